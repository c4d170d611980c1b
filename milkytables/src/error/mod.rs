//! Error types

mod field;
mod table;
mod validation;

pub use field::*;
pub use table::*;
pub use validation::*;
