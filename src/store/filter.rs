//! # Equality Filters
//!
//! A field-name to value mapping. A document matches when every named field
//! is present and exactly equal to the given value. An empty filter matches
//! everything.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EqualityFilter {
    fields: BTreeMap<String, Value>,
}

impl EqualityFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `field == value` condition
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Conditions as `(field, value)` pairs, ordered by field name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Check a document's payload fields against every condition
    pub fn matches(&self, doc: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field).map_or(false, |v| values_equal(v, expected)))
    }
}

/// JSON equality where integer and float encodings of the same number match
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => x.as_f64() == y.as_f64(),
        },
        _ => a == b,
    }
}
