//! Schema validation gate
//!
//! Every value a [`Table`](crate::table::Table) stores has gone through a
//! [`Schema`]: raw caller input is parsed (and possibly coerced) into the
//! table's row type, or handed back with a [`Diagnostic`] in a [`Rejected`].

mod json;
mod record;

use std::fmt;
use std::fmt::Debug;
use std::marker::PhantomData;

pub use json::JsonSchema;
pub use record::FieldKind;
pub use record::FieldRule;
pub use record::RecordSchema;

use crate::error::Diagnostic;
use crate::error::Rejected;
use crate::model::RowData;

/// Parse-or-fail validator for row values.
///
/// Implementations must be synchronous and deterministic: the same input
/// always yields the same output or the same diagnostic.
pub trait Schema {
    /// What callers hand to `create`, `add` and `update`.
    type Input: Debug;
    /// The conforming row type stored in the table.
    type Output: RowData;

    /// Parses a raw value into a conforming row value, or returns it with
    /// the reasons it does not conform.
    fn parse(&self, raw: Self::Input) -> Result<Self::Output, Rejected<Self::Input>>;
}

/// The identity schema: accepts every value unchanged.
///
/// Tables built without validation use this schema.
pub struct Unchecked<V>(PhantomData<fn() -> V>);

impl<V> Unchecked<V> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<V> Default for Unchecked<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Unchecked<V> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<V> Debug for Unchecked<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Unchecked")
    }
}

impl<V: RowData + Debug> Schema for Unchecked<V> {
    type Input = V;
    type Output = V;

    fn parse(&self, raw: V) -> Result<V, Rejected<V>> {
        Ok(raw)
    }
}

/// Adapts a closure into a [`Schema`].
///
/// The closure borrows the raw value, so a rejected value can be handed back.
///
/// # Example
///
/// ```
/// use milkytables::error::Diagnostic;
/// use milkytables::model::Record;
/// use milkytables::schema::{FnSchema, Schema};
///
/// let adults = FnSchema::new(|record: &Record| match record.get_int("age") {
///     Ok(Some(age)) if age >= 18 => Ok(record.clone()),
///     _ => Err(Diagnostic::single("age", "must be 18 or older")),
/// });
///
/// assert!(adults.parse(Record::new().set("age", 30)).is_ok());
/// assert!(adults.parse(Record::new().set("age", 12)).is_err());
/// ```
pub struct FnSchema<I, V, F> {
    parse: F,
    _marker: PhantomData<fn(I) -> V>,
}

impl<I, V, F> FnSchema<I, V, F>
where
    F: Fn(&I) -> Result<V, Diagnostic>,
{
    pub fn new(parse: F) -> Self {
        Self {
            parse,
            _marker: PhantomData,
        }
    }
}

impl<I, V, F> Schema for FnSchema<I, V, F>
where
    I: Debug,
    V: RowData,
    F: Fn(&I) -> Result<V, Diagnostic>,
{
    type Input = I;
    type Output = V;

    fn parse(&self, raw: I) -> Result<V, Rejected<I>> {
        (self.parse)(&raw).map_err(|diagnostic| Rejected::new(raw, diagnostic))
    }
}

impl<I, V, F> Debug for FnSchema<I, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSchema")
    }
}
