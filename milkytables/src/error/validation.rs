//! Validation error types

use std::fmt;

/// Error information for a specific field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidationError {
    /// The field that failed validation. `"$"` refers to the value as a whole.
    pub field: String,
    /// Human-readable validation error message.
    pub message: String,
    /// Optional machine-readable error code.
    pub code: Option<String>,
}

impl FieldValidationError {
    /// Creates a new field validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: None,
        }
    }

    /// Creates a new field validation error with an error code.
    pub fn with_code(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = &self.code {
            write!(f, "{}: {} ({})", self.field, self.message, code)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// The diagnostic payload a [`Schema`](crate::schema::Schema) returns when a
/// value does not conform.
///
/// Holds one entry per failing field, in the order the schema checked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostic {
    issues: Vec<FieldValidationError>,
}

impl Diagnostic {
    /// Creates an empty diagnostic.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a diagnostic holding a single issue.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            issues: vec![FieldValidationError::new(field, message)],
        }
    }

    /// Appends an issue.
    pub fn push(&mut self, issue: FieldValidationError) {
        self.issues.push(issue);
    }

    /// Adds an issue (builder pattern).
    pub fn with(mut self, issue: FieldValidationError) -> Self {
        self.issues.push(issue);
        self
    }

    /// Returns the collected issues.
    pub fn issues(&self) -> &[FieldValidationError] {
        &self.issues
    }

    /// Returns `true` if no issue was recorded.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if some issue refers to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    /// Converts into `Err(self)` when issues were collected, `Ok(value)` otherwise.
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostic> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl From<FieldValidationError> for Diagnostic {
    fn from(issue: FieldValidationError) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

impl FromIterator<FieldValidationError> for Diagnostic {
    fn from_iter<I: IntoIterator<Item = FieldValidationError>>(iter: I) -> Self {
        Self {
            issues: iter.into_iter().collect(),
        }
    }
}

/// A schema's refusal: the raw input handed back with the diagnostic.
///
/// Returning the input lets callers describe the offending value only when
/// something actually failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<I> {
    input: I,
    diagnostic: Diagnostic,
}

impl<I> Rejected<I> {
    pub fn new(input: I, diagnostic: impl Into<Diagnostic>) -> Self {
        Self {
            input,
            diagnostic: diagnostic.into(),
        }
    }

    /// Returns the rejected input.
    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }

    pub fn into_parts(self) -> (I, Diagnostic) {
        (self.input, self.diagnostic)
    }
}

impl<I> fmt::Display for Rejected<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl<I: fmt::Debug> From<Rejected<I>> for ValidationError {
    fn from(rejected: Rejected<I>) -> Self {
        let (input, diagnostic) = rejected.into_parts();
        ValidationError::new(&input, diagnostic)
    }
}

/// A row value was rejected by the table's schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Row value {value} rejected: {diagnostic}")]
pub struct ValidationError {
    /// Debug rendering of the offending raw value.
    pub value: String,
    /// Position of the value in the input list, for `create`.
    pub index: Option<usize>,
    /// What the schema reported.
    pub diagnostic: Diagnostic,
}

impl ValidationError {
    /// Creates a validation error for a single raw value.
    pub fn new(value: &impl fmt::Debug, diagnostic: Diagnostic) -> Self {
        Self {
            value: format!("{value:?}"),
            index: None,
            diagnostic,
        }
    }

    /// Records the input position of the offending value.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}
