//! Value enum for dynamic field values

use std::cmp::Ordering;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic field value, as projected out of a row for display and sorting.
///
/// # Type Mapping
///
/// | Kind | Rust Variant |
/// |------|--------------|
/// | null / absent | `Null` |
/// | boolean | `Bool` |
/// | integer | `Int` |
/// | floating point | `Float` |
/// | fixed-point decimal | `Decimal` |
/// | text | `String` |
/// | UUID | `Guid` |
/// | timestamp | `DateTime` |
///
/// # Example
///
/// ```
/// use milkytables::model::Value;
///
/// let name = Value::from("Jane");
/// let age = Value::from(21);
/// let empty = Value::Null;
/// assert!(empty.is_null());
/// assert_eq!(age.type_name(), "int");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// String value.
    String(String),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time in UTC.
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for `Int`, `Float` and `Decimal`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Decimal(_))
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns any numeric value as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            Value::Decimal(d) => d.to_f64(),
            _ => None,
        }
    }

    /// Total, deterministic ordering used by column sorting.
    ///
    /// Values of the same kind use their natural order (floats use IEEE
    /// total ordering). Numbers of different kinds compare by their exact
    /// numeric value, ties broken by kind (`Int`, `Float`, `Decimal`).
    /// Otherwise kinds are ordered `Null`, numbers, `Bool`, `String`, `Guid`,
    /// `DateTime`.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Guid(a), Value::Guid(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (a, b) if a.is_number() && b.is_number() => a
                .numeric_cmp(b)
                .then_with(|| a.kind_rank().cmp(&b.kind_rank())),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    /// Exact numeric comparison of two numbers of different kinds.
    fn numeric_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Float(a), b) => b
                .exact_decimal()
                .map_or(Ordering::Equal, |b| cmp_float_decimal(*a, &b)),
            (a, Value::Float(b)) => a
                .exact_decimal()
                .map_or(Ordering::Equal, |a| cmp_float_decimal(*b, &a).reverse()),
            (a, b) => a.exact_decimal().cmp(&b.exact_decimal()),
        }
    }

    /// `Int` and `Decimal` as a lossless `Decimal`.
    fn exact_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Int(n) => Some(Decimal::from(*n)),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Decimal(_) => 3,
            Value::Bool(_) => 4,
            Value::String(_) => 5,
            Value::Guid(_) => 6,
            Value::DateTime(_) => 7,
        }
    }
}

// =============================================================================
// Exact float/decimal comparison
// =============================================================================

/// 2^96, just above `Decimal::MAX`.
const DECIMAL_BOUND: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Largest `Decimal` scale.
const MAX_SCALE: u32 = 28;

/// Compares a float with a decimal by exact value.
///
/// NaNs and infinities sit outside the decimal range, on the side of their
/// sign, which matches where `f64::total_cmp` puts them among finite floats.
fn cmp_float_decimal(f: f64, d: &Decimal) -> Ordering {
    if !f.is_finite() || f.abs() >= DECIMAL_BOUND {
        return if f.is_sign_negative() {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    // |f| < 2^96, so its integral part is exact in i128.
    let unit = 10i128.pow(d.scale());
    let (d_int, d_frac) = (d.mantissa() / unit, d.mantissa() % unit);
    let f_int = f.trunc() as i128;
    match f_int.cmp(&d_int) {
        Ordering::Equal => {}
        other => return other,
    }

    let f_frac = f.fract();
    let f_sign: i128 = if f_frac > 0.0 {
        1
    } else if f_frac < 0.0 {
        -1
    } else {
        0
    };
    match f_sign.cmp(&d_frac.signum()) {
        Ordering::Equal if f_sign == 0 => Ordering::Equal,
        Ordering::Equal => {
            let scaled = d_frac.unsigned_abs() * 10u128.pow(MAX_SCALE - d.scale());
            let magnitude = cmp_fraction(f_frac.abs(), scaled);
            if f_sign > 0 {
                magnitude
            } else {
                magnitude.reverse()
            }
        }
        other => other,
    }
}

/// Compares `x` in `(0, 1)` with `scaled / 10^28`.
fn cmp_fraction(x: f64, scaled: u128) -> Ordering {
    // x = m / 2^e
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as u32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mut m, mut e) = if biased == 0 {
        (fraction, 1074)
    } else {
        (fraction | (1u64 << 52), 1075 - biased)
    };
    let shift = m.trailing_zeros().min(e);
    m >>= shift;
    e -= shift;

    // m * 10^28 / 2^e  vs  scaled, i.e.  m * 5^28 * 2^28  vs  scaled * 2^e
    let lhs = u128::from(m) * 5u128.pow(MAX_SCALE);
    if e >= MAX_SCALE {
        cmp_shifted(lhs, scaled, e - MAX_SCALE)
    } else {
        (lhs << (MAX_SCALE - e)).cmp(&scaled)
    }
}

/// Compares `lhs` with `rhs * 2^shift` without overflowing.
fn cmp_shifted(lhs: u128, rhs: u128, shift: u32) -> Ordering {
    if rhs == 0 {
        return lhs.cmp(&0);
    }
    if shift >= rhs.leading_zeros() {
        // rhs * 2^shift >= 2^127, beyond any lhs
        return Ordering::Less;
    }
    lhs.cmp(&(rhs << shift))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::String(s) => f.write_str(s),
            Value::Guid(g) => write!(f, "{g}"),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_kind_natural_order() {
        assert_eq!(Value::from(1).sort_cmp(&Value::from(2)), Ordering::Less);
        assert_eq!(Value::from("b").sort_cmp(&Value::from("a")), Ordering::Greater);
        assert_eq!(Value::from(false).sort_cmp(&Value::from(true)), Ordering::Less);
        assert_eq!(Value::Null.sort_cmp(&Value::Null), Ordering::Equal);
    }

    #[test]
    fn test_mixed_numbers_compare_numerically() {
        assert_eq!(Value::from(2).sort_cmp(&Value::from(1.5)), Ordering::Greater);
        assert_eq!(Value::from(1.5).sort_cmp(&Value::from(2)), Ordering::Less);
        assert_eq!(
            Value::from(Decimal::new(25, 1)).sort_cmp(&Value::from(3)),
            Ordering::Less
        );
        // equal magnitude, tie broken by kind
        assert_eq!(Value::from(1).sort_cmp(&Value::from(1.0)), Ordering::Less);
        assert_eq!(Value::from(1.0).sort_cmp(&Value::from(1)), Ordering::Greater);
        assert_eq!(
            Value::from(Decimal::from(4)).sort_cmp(&Value::from(4)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mixed_numbers_compare_exactly_beyond_f64_precision() {
        let int = Value::Int(9_007_199_254_740_993);
        let float = Value::Float(9_007_199_254_740_992.0);
        let decimal = Value::Decimal(Decimal::new(90_071_992_547_409_925, 1));

        assert_eq!(float.sort_cmp(&int), Ordering::Less);
        assert_eq!(float.sort_cmp(&decimal), Ordering::Less);
        assert_eq!(decimal.sort_cmp(&int), Ordering::Less);
        assert_eq!(int.sort_cmp(&float), Ordering::Greater);
    }

    #[test]
    fn test_float_against_decimal_fraction() {
        // 0.1f64 is slightly above one tenth
        let tenth = Value::Decimal(Decimal::new(1, 1));
        assert_eq!(Value::from(0.1).sort_cmp(&tenth), Ordering::Greater);
        assert_eq!(Value::from(0.5).sort_cmp(&Value::Decimal(Decimal::new(5, 1))), Ordering::Less);
        assert_eq!(Value::from(-0.5).sort_cmp(&Value::Decimal(Decimal::new(-4, 1))), Ordering::Less);
        assert_eq!(Value::from(-1.25).sort_cmp(&Value::Decimal(Decimal::new(-125, 2))), Ordering::Less);
        assert_eq!(Value::Decimal(Decimal::new(-125, 2)).sort_cmp(&Value::from(-1.25)), Ordering::Greater);
    }

    #[test]
    fn test_non_finite_floats_bound_other_numbers() {
        let max = Value::Decimal(Decimal::MAX);
        let min = Value::Int(i64::MIN);

        assert_eq!(Value::from(f64::INFINITY).sort_cmp(&max), Ordering::Greater);
        assert_eq!(Value::from(f64::NEG_INFINITY).sort_cmp(&min), Ordering::Less);
        assert_eq!(Value::from(f64::NAN).sort_cmp(&max), Ordering::Greater);
        assert_eq!(Value::from(1e30).sort_cmp(&max), Ordering::Greater);
        assert_eq!(Value::from(-0.0).sort_cmp(&Value::Int(0)), Ordering::Greater);
        assert_eq!(Value::from(-0.0).sort_cmp(&Value::from(0.0)), Ordering::Less);
    }

    #[test]
    fn test_mixed_kinds_use_rank() {
        assert_eq!(Value::Null.sort_cmp(&Value::from(-5)), Ordering::Less);
        assert_eq!(Value::from(100).sort_cmp(&Value::from(false)), Ordering::Less);
        assert_eq!(Value::from(true).sort_cmp(&Value::from("a")), Ordering::Less);
        assert_eq!(Value::from("z").sort_cmp(&Value::from(Uuid::nil())), Ordering::Less);
    }

    #[test]
    fn test_nan_is_ordered() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan.sort_cmp(&nan), Ordering::Equal);
        assert_eq!(Value::from(1.0).sort_cmp(&nan), Ordering::Less);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(21).to_string(), "21");
        assert_eq!(Value::from("Jane").to_string(), "Jane");
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 3, 2.5, "21"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(3),
                Value::Float(2.5),
                Value::String("21".into()),
            ]
        );
    }
}
