//! Immutable, schema-validated tables
//!
//! `milkytables` is the data layer beneath UI table components. A [`Table`]
//! holds identified rows plus column descriptors; add, update, delete, copy,
//! clear and sort all return a new table and leave the old one intact.
//! Every stored value first passes through a [`schema::Schema`].

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod schema;
pub mod table;

pub use config::TableConfig;
pub use error::Error;
pub use error::Result;
pub use table::Direction;
pub use table::PlainTable;
pub use table::Table;
