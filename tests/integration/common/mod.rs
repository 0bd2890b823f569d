//! Shared fixtures for integration tests.

use std::path::PathBuf;
use tempfile::TempDir;
use tf_types::Event;

/// Generate web access log events with the specified count.
///
/// Every third event is a server error; every fifth has a `tags` list.
pub fn generate_access_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            let status = if i % 3 == 0 { 500 } else { 200 };
            let mut value = serde_json::json!({
                "id": i,
                "status": status,
                "path": format!("/api/v1/items/{i:06}/details"),
                "message": format!("request {i:06} handled with status {status}"),
            });
            if i % 5 == 0 {
                value["tags"] = serde_json::json!(["production", "eu-west-1", i]);
            }
            serde_json::from_value(value).expect("fixture is a JSON object")
        })
        .collect()
}

/// Write a rules file into a fresh temp dir.
///
/// The returned `TempDir` must outlive the path.
pub fn write_rules(file_name: &str, contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(file_name);
    std::fs::write(&path, contents).expect("write rules file");
    (dir, path)
}
