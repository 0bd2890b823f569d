//! Event <-> Rhai type conversion utilities.

use rhai::{Array, Dynamic, Map, Scope};
use tf_types::{Event, Value};

/// Name under which the whole event is visible to expressions.
pub(crate) const EVENT_VARIABLE: &str = "event";

/// Converts a field value to a Rhai Dynamic.
pub fn value_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::String(s) => Dynamic::from(s.clone()),
        Value::List(items) => Dynamic::from(items.iter().map(value_to_dynamic).collect::<Array>()),
        Value::Other(other) => json_to_dynamic(other),
    }
}

/// Converts a JSON value to a Rhai Dynamic.
///
/// Integral numbers become `INT`, other numbers `FLOAT`, null becomes `()`.
fn json_to_dynamic(value: &serde_json::Value) -> Dynamic {
    match value {
        serde_json::Value::Null => Dynamic::UNIT,
        serde_json::Value::Bool(b) => Dynamic::from(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Dynamic::from(i)
            } else if let Some(f) = n.as_f64() {
                Dynamic::from(f)
            } else {
                Dynamic::UNIT
            }
        }
        serde_json::Value::String(s) => Dynamic::from(s.clone()),
        serde_json::Value::Array(items) => {
            Dynamic::from(items.iter().map(json_to_dynamic).collect::<Array>())
        }
        serde_json::Value::Object(object) => {
            let mut map = Map::new();
            for (key, value) in object {
                map.insert(key.as_str().into(), json_to_dynamic(value));
            }
            Dynamic::from(map)
        }
    }
}

/// Converts an event to a Rhai map.
pub fn event_to_map(event: &Event) -> Map {
    let mut map = Map::new();
    for (key, value) in event.iter() {
        map.insert(key.into(), value_to_dynamic(value));
    }
    map
}

/// Pushes every event field, then the event itself, into `scope`.
///
/// The event map goes last so it shadows a field literally named `event`.
pub(crate) fn populate_scope(event: &Event, scope: &mut Scope<'_>) {
    let map = event_to_map(event);
    for (key, value) in &map {
        scope.push_dynamic(key.clone(), value.clone());
    }
    scope.push_dynamic(EVENT_VARIABLE, Dynamic::from(map));
}
