//! Applies truncation to one named field, by value shape.

use crate::truncate::truncate;
use tf_types::{Event, Value};

/// Truncates the field `field` of `event` in place.
///
/// - absent field: nothing happens
/// - string: replaced by its truncation
/// - list: every string element is truncated; other elements, nested lists
///   included, stay as they are and the order is kept
/// - anything else: nothing happens
///
/// Returns the number of string values rewritten.
pub fn apply_rule_to_field(
    event: &mut Event,
    field: &str,
    start: usize,
    length: Option<usize>,
) -> usize {
    let Some(value) = event.get_mut(field) else {
        return 0;
    };

    match value {
        Value::String(s) => {
            *s = truncate(s, start, length);
            1
        }
        Value::List(items) => {
            let mut rewritten = 0;
            for item in items.iter_mut() {
                if let Value::String(s) = item {
                    *s = truncate(s, start, length);
                    rewritten += 1;
                }
            }
            rewritten
        }
        Value::Other(_) => 0,
    }
}
