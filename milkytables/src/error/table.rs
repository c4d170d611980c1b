//! Table operation errors

use crate::model::RowId;

use super::ValidationError;

/// Errors returned by [`Table`](crate::table::Table) operations.
///
/// Every failing operation leaves the receiving table untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A row value did not pass the table's schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `copy` referenced a row id that is not in the table.
    #[error("Row {0} not found")]
    RowNotFound(RowId),

    /// Two columns were declared with the same key.
    #[error("Duplicate column key '{0}'")]
    DuplicateColumn(String),

    /// The largest row id is `u64::MAX`, so no next id exists.
    #[error("Row id space exhausted")]
    IdExhausted,
}

impl Error {
    /// Returns the validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, Error>;
