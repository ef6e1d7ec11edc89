//! Validation error types for incoming Person payloads

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single field violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name (`$body` for the payload as a whole)
    pub field: String,
    /// What was wrong with it
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "field required")
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, format!("expected {}, got {}", expected, actual))
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.field, self.message)
    }
}

/// Payload rejected before it reaches storage.
///
/// Carries every violation found, in schema field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", summary(.details))]
pub struct ValidationError {
    details: Vec<FieldError>,
}

fn summary(details: &[FieldError]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Build from a non-empty list of violations
    pub fn new(details: Vec<FieldError>) -> Self {
        debug_assert!(!details.is_empty());
        Self { details }
    }

    pub fn single(detail: FieldError) -> Self {
        Self::new(vec![detail])
    }

    pub fn details(&self) -> &[FieldError] {
        &self.details
    }

    pub fn into_details(self) -> Vec<FieldError> {
        self.details
    }

    /// Whether a violation was recorded for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.details.iter().any(|d| d.field == field)
    }
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, ValidationError>;
