//! Row model: identities, values, column descriptors

mod column;
mod record;
mod row;
mod value;

pub use column::*;
pub use record::*;
pub use row::*;
pub use value::*;
