//! serde-backed schema

use std::fmt;
use std::marker::PhantomData;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::Schema;
use crate::error::FieldValidationError;
use crate::error::Rejected;
use crate::model::RowData;

/// Validates raw JSON by deserializing it into the row type.
///
/// The row type's `Deserialize` impl is the shape declaration; serde
/// attributes such as `#[serde(default)]` or `deny_unknown_fields` control
/// coercion and strictness.
///
/// # Example
///
/// ```
/// use milkytables::schema::{JsonSchema, Schema};
/// use milkytables::model::Record;
///
/// let schema = JsonSchema::<Record>::new();
/// let record = schema.parse(serde_json::json!({ "name": "Jane" })).unwrap();
/// assert_eq!(record.get_string("name").unwrap(), Some("Jane"));
///
/// assert!(schema.parse(serde_json::json!([1, 2])).is_err());
/// ```
pub struct JsonSchema<V>(PhantomData<fn() -> V>);

impl<V> JsonSchema<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V> Default for JsonSchema<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for JsonSchema<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for JsonSchema<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JsonSchema<{}>", std::any::type_name::<V>())
    }
}

impl<V: DeserializeOwned + RowData> Schema for JsonSchema<V> {
    type Input = serde_json::Value;
    type Output = V;

    fn parse(&self, raw: serde_json::Value) -> Result<V, Rejected<serde_json::Value>> {
        V::deserialize(&raw).map_err(|err| {
            let code = match err.classify() {
                serde_json::error::Category::Data => "invalid_type",
                serde_json::error::Category::Syntax => "syntax",
                serde_json::error::Category::Eof => "eof",
                serde_json::error::Category::Io => "io",
            };
            Rejected::new(raw, FieldValidationError::with_code("$", err.to_string(), code))
        })
    }
}
