//! Declarative schema for dynamic records

use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use log::trace;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::Schema;
use crate::error::Diagnostic;
use crate::error::FieldValidationError;
use crate::error::Rejected;
use crate::model::Record;
use crate::model::Value;

/// Expected kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any non-null value.
    Any,
    Bool,
    Int,
    /// Also accepts integers, widened.
    Float,
    /// Also accepts integers, widened.
    Decimal,
    String,
    Guid,
    DateTime,
}

impl FieldKind {
    /// Returns the name used in diagnostics, matching [`Value::type_name`].
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Any => "any",
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Decimal => "decimal",
            FieldKind::String => "string",
            FieldKind::Guid => "guid",
            FieldKind::DateTime => "datetime",
        }
    }
}

/// One field of a [`RecordSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    name: String,
    kind: FieldKind,
    required: bool,
    coerce: bool,
}

impl FieldRule {
    /// Creates a required, non-coercing rule.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            coerce: false,
        }
    }

    /// Allows the field to be absent or null. Absent fields are stored as null.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Converts compatible values (e.g. `"21"` to `21`) instead of rejecting them.
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the expected kind.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns `true` if the field must be present and non-null.
    pub fn is_required(&self) -> bool {
        self.required
    }

    fn check(&self, value: &Value) -> Result<Value, String> {
        let accepted = match (self.kind, value) {
            (FieldKind::Any, v) => Some(v.clone()),
            (FieldKind::Bool, Value::Bool(_))
            | (FieldKind::Int, Value::Int(_))
            | (FieldKind::Float, Value::Float(_))
            | (FieldKind::Decimal, Value::Decimal(_))
            | (FieldKind::String, Value::String(_))
            | (FieldKind::Guid, Value::Guid(_))
            | (FieldKind::DateTime, Value::DateTime(_)) => Some(value.clone()),
            (FieldKind::Float, Value::Int(n)) => Some(Value::Float(*n as f64)),
            (FieldKind::Decimal, Value::Int(n)) => Some(Value::Decimal(Decimal::from(*n))),
            _ => None,
        };

        if let Some(v) = accepted {
            return Ok(v);
        }
        if self.coerce {
            return coerce(self.kind, value);
        }
        Err(format!(
            "expected {}, got {}",
            self.kind.name(),
            value.type_name()
        ))
    }
}

fn coerce(kind: FieldKind, value: &Value) -> Result<Value, String> {
    let fail = || format!("cannot coerce {} '{}' to {}", value.type_name(), value, kind.name());

    match (kind, value) {
        (FieldKind::String, v) => Ok(Value::String(v.to_string())),
        (FieldKind::Int, Value::String(s)) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail()),
        (FieldKind::Int, Value::Float(n)) if n.fract() == 0.0 && n.is_finite() => {
            i64::try_from(*n as i128).map(Value::Int).map_err(|_| fail())
        }
        (FieldKind::Float, Value::String(s)) => s.trim().parse::<f64>().map(Value::Float).map_err(|_| fail()),
        (FieldKind::Float, Value::Decimal(_)) => value.as_f64().map(Value::Float).ok_or_else(fail),
        (FieldKind::Decimal, Value::String(s)) => Decimal::from_str(s.trim()).map(Value::Decimal).map_err(|_| fail()),
        (FieldKind::Decimal, Value::Float(n)) => Decimal::try_from(*n).map(Value::Decimal).map_err(|_| fail()),
        (FieldKind::Bool, Value::String(s)) => match s.trim() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(fail()),
        },
        (FieldKind::Guid, Value::String(s)) => Uuid::parse_str(s.trim()).map(Value::Guid).map_err(|_| fail()),
        (FieldKind::DateTime, Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Value::DateTime(dt.with_timezone(&Utc)))
            .map_err(|_| fail()),
        _ => Err(fail()),
    }
}

/// Field-by-field schema for [`Record`] rows.
///
/// Parsing checks every rule and reports all failing fields together. Fields
/// without a rule are dropped, or rejected when the schema is
/// [`strict`](RecordSchema::strict).
///
/// # Example
///
/// ```
/// use milkytables::model::Record;
/// use milkytables::schema::{FieldKind, FieldRule, RecordSchema, Schema};
///
/// let schema = RecordSchema::new()
///     .field(FieldRule::new("name", FieldKind::String))
///     .field(FieldRule::new("age", FieldKind::Int).coerce());
///
/// let parsed = schema.parse(Record::new().set("name", "Jane").set("age", "21")).unwrap();
/// assert_eq!(parsed.get_int("age").unwrap(), Some(21));
///
/// let err = schema.parse(Record::new().set("age", "old")).unwrap_err().into_diagnostic();
/// assert!(err.has_field("name"));
/// assert!(err.has_field("age"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSchema {
    rules: Vec<FieldRule>,
    strict: bool,
}

impl RecordSchema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field rule (builder pattern). A later rule for the same name
    /// replaces the earlier one.
    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.retain(|r| r.name != rule.name);
        self.rules.push(rule);
        self
    }

    /// Rejects fields that have no rule instead of dropping them.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Returns the field rules in declaration order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

impl Schema for RecordSchema {
    type Input = Record;
    type Output = Record;

    fn parse(&self, raw: Record) -> Result<Record, Rejected<Record>> {
        let mut parsed = Record::new();
        let mut diagnostic = Diagnostic::new();

        for rule in &self.rules {
            match raw.get(&rule.name) {
                None | Some(Value::Null) if rule.required => {
                    diagnostic.push(FieldValidationError::with_code(
                        &rule.name,
                        format!("required {} field is missing", rule.kind.name()),
                        "required",
                    ));
                }
                None | Some(Value::Null) => parsed.insert(&rule.name, Value::Null),
                Some(value) => match rule.check(value) {
                    Ok(value) => parsed.insert(&rule.name, value),
                    Err(message) => diagnostic.push(FieldValidationError::with_code(
                        &rule.name,
                        message,
                        "invalid_type",
                    )),
                },
            }
        }

        for name in raw.fields().keys() {
            if self.rule(name).is_some() {
                continue;
            }
            if self.strict {
                diagnostic.push(FieldValidationError::with_code(
                    name,
                    "field is not declared",
                    "unrecognized_key",
                ));
            } else {
                trace!("dropping undeclared field '{name}'");
            }
        }

        diagnostic
            .into_result(parsed)
            .map_err(|diagnostic| Rejected::new(raw, diagnostic))
    }
}
