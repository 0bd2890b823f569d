//! Field values carried by events.

use serde::{Deserialize, Serialize};

/// The value of a single event field.
///
/// Only two shapes matter to field transforms: plain strings and lists of
/// values. Everything else (numbers, booleans, null, nested objects) is
/// carried opaquely in [`Value::Other`] and never rewritten.
///
/// Serializes to and from plain JSON: strings become [`Value::String`],
/// arrays become [`Value::List`] (recursively), anything else becomes
/// [`Value::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// A string value
    String(String),

    /// An ordered, heterogeneous list of values
    List(Vec<Value>),

    /// Any other JSON value (number, bool, null, object)
    Other(serde_json::Value),
}

impl Value {
    /// Returns the string slice if this is a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            other => Self::Other(other),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Other(other) => other,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Other(n.into())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Other(b.into())
    }
}
