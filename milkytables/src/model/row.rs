//! Rows and the row-data binding

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Identity of a row within one table.
///
/// Ids are assigned by the table (largest id + 1, starting at 0) and mean
/// nothing outside the table lineage that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(pub u64);

impl RowId {
    /// The id given to the first row of an empty table.
    pub const FIRST: RowId = RowId(0);

    /// Returns the id following this one, or `None` on overflow.
    pub fn next(self) -> Option<RowId> {
        self.0.checked_add(1).map(RowId)
    }
}

impl From<u64> for RowId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value type that can be stored in a table.
///
/// `Key` names the fields a column may project. Because a
/// [`Column`](super::Column) is generic over the key type, columns can only be
/// attached to tables whose row type uses the same key.
///
/// # Example
///
/// ```
/// use milkytables::model::{RowData, Value};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum PersonKey { Name, Age }
///
/// #[derive(Debug, Clone)]
/// struct Person { name: String, age: i64 }
///
/// impl RowData for Person {
///     type Key = PersonKey;
///
///     fn field(&self, key: &PersonKey) -> Value {
///         match key {
///             PersonKey::Name => self.name.as_str().into(),
///             PersonKey::Age => self.age.into(),
///         }
///     }
/// }
/// ```
pub trait RowData {
    /// Field name type.
    type Key: Clone + Eq + Hash + Debug;

    /// Returns the value stored under `key`. Absent fields are `Value::Null`.
    fn field(&self, key: &Self::Key) -> Value;
}

/// A row stored in a table: an id plus a shared value payload.
///
/// The value sits behind an `Arc`, so rows carried into a descendant table
/// (and rows produced by `copy`) share storage with their source.
#[derive(Debug, Serialize)]
pub struct Row<V> {
    id: RowId,
    value: Arc<V>,
}

impl<V> Row<V> {
    pub(crate) fn new(id: RowId, value: V) -> Self {
        Self {
            id,
            value: Arc::new(value),
        }
    }

    pub(crate) fn with_shared(id: RowId, value: Arc<V>) -> Self {
        Self { id, value }
    }

    /// Returns the row id.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the row value.
    pub fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn shared_value(&self) -> &Arc<V> {
        &self.value
    }
}

impl<V> Clone for Row<V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

impl<V: PartialEq> PartialEq for Row<V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value == other.value
    }
}
