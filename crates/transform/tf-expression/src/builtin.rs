//! Helper functions available to condition expressions.

use rhai::{Engine, Map};

/// Registers all condition helpers in the Rhai engine.
pub fn register_condition_functions(engine: &mut Engine) {
    register_string_functions(engine);
    register_map_functions(engine);
}

fn register_string_functions(engine: &mut Engine) {
    // Length in characters, matching how truncation counts
    engine.register_fn("length", |s: &str| -> i64 { s.chars().count() as i64 });
}

fn register_map_functions(engine: &mut Engine) {
    engine.register_fn("has_key", |map: &mut Map, key: &str| map.contains_key(key));
}
