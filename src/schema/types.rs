//! Field types shared by the Person schema and the route layer

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closeness ring of a Person.
///
/// Serialized as its integer value (1-4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Tier {
    Inner = 1,
    Close = 2,
    Familiar = 3,
    Extended = 4,
}

impl Tier {
    /// Integer value as stored and exposed over HTTP
    pub fn value(self) -> i64 {
        self as i64
    }

    /// Map an integer onto a tier; anything outside 1-4 is `None`
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Tier::Inner),
            2 => Some(Tier::Close),
            3 => Some(Tier::Familiar),
            4 => Some(Tier::Extended),
            _ => None,
        }
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Familiar
    }
}

impl TryFrom<i64> for Tier {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Tier::from_value(value).ok_or_else(|| format!("tier must be one of 1, 2, 3, 4, got {}", value))
    }
}

impl From<Tier> for i64 {
    fn from(tier: Tier) -> Self {
        tier.value()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// JSON type name for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
