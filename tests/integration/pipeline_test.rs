//! Rules file -> Rhai conditions -> truncate processor, end to end.

use crate::common::{generate_access_events, write_rules};
use serde_json::json;
use std::sync::Arc;
use tf_expression::RhaiEvaluator;
use tf_traits::{CollectingSink, Processor};
use tf_truncate::{TruncateConfig, TruncateProcessor};
use tf_types::{Event, Value};

const ACCESS_RULES: &str = r#"
entries:
  # Keep the first 8 characters of every message
  - source_fields: ["message"]
    length: 8
  # Drop the common prefix from error paths
  - source_fields: ["path"]
    condition: "status >= 500"
    start: 8
  # Two-letter tags
  - source_keys: ["tags"]
    start_at: 0
    length: 2
"#;

fn load(file_name: &str, contents: &str) -> TruncateProcessor {
    let (_dir, path) = write_rules(file_name, contents);
    let config = TruncateConfig::from_file(&path).unwrap();
    TruncateProcessor::from_config(&config, Arc::new(RhaiEvaluator::new())).unwrap()
}

fn expected_access_event(event: &Event) -> Event {
    let i = match event.get("id") {
        Some(Value::Other(serde_json::Value::Number(n))) => n.as_u64().unwrap(),
        other => panic!("unexpected id {other:?}"),
    };
    let status = if i % 3 == 0 { 500 } else { 200 };
    let mut path = format!("/api/v1/items/{i:06}/details");
    if status >= 500 {
        path = path[8..].to_string();
    }
    let mut expected = json!({
        "id": i,
        "status": status,
        "path": path,
        "message": "request ",
    });
    if i % 5 == 0 {
        expected["tags"] = json!(["pr", "eu", i]);
    }
    serde_json::from_value(expected).unwrap()
}

#[test]
fn test_access_log_pipeline_sequential() {
    let processor = load("rules.yaml", ACCESS_RULES);
    let input = generate_access_events(300);

    let output = processor.execute(input.clone());

    assert_eq!(output.len(), input.len());
    for (before, after) in input.iter().zip(&output) {
        assert_eq!(after, &expected_access_event(before));
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let sequential = load("rules.yaml", ACCESS_RULES);
    let parallel = load("rules.yaml", ACCESS_RULES).with_parallel(true);
    let input = generate_access_events(2_000);

    let mut seq_batch = input.clone();
    let mut par_batch = input;
    let seq_report = sequential.process_batch(&mut seq_batch);
    let par_report = parallel.process_batch(&mut par_batch);

    assert_eq!(seq_batch, par_batch);
    assert_eq!(seq_report.values_truncated(), par_report.values_truncated());
    assert!(par_report.is_clean());
}

#[test]
fn test_json_rules_file() {
    let processor = load(
        "rules.json",
        r#"{"entries": [{"source_fields": ["message"], "condition": "level == \"WARN\"", "start": 2, "length": 3}]}"#,
    );

    let output = processor.execute(vec![
        serde_json::from_value(json!({"level": "WARN", "message": "disk almost full"})).unwrap(),
        serde_json::from_value(json!({"level": "INFO", "message": "disk almost full"})).unwrap(),
    ]);

    assert_eq!(output[0].get("message"), Some(&Value::from("sk ")));
    assert_eq!(output[1].get("message"), Some(&Value::from("disk almost full")));
}

#[test]
fn test_failures_reported_per_event() {
    let sink = Arc::new(CollectingSink::new());
    let processor = load(
        "rules.yaml",
        r#"
entries:
  - source_fields: ["user"]
    length: 3
  - source_fields: ["user"]
    condition: 'region == "eu"'
    start: 1
"#,
    )
    .with_sink(sink.clone())
    .with_parallel(true);

    let mut batch: Vec<Event> = (0..50)
        .map(|i| {
            let value = if i % 10 == 7 {
                json!({"user": "alexandra"})
            } else {
                json!({"user": "alexandra", "region": "eu"})
            };
            serde_json::from_value(value).unwrap()
        })
        .collect();

    let report = processor.process_batch(&mut batch);

    assert_eq!(report.failed(), 5);
    let positions: Vec<usize> = sink.failures().iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![7, 17, 27, 37, 47]);

    for (i, event) in batch.iter().enumerate() {
        let expected = if i % 10 == 7 { "ale" } else { "le" };
        assert_eq!(event.get("user"), Some(&Value::from(expected)), "event {i}");
    }
}

#[test]
fn test_unicode_messages() {
    let processor = load(
        "rules.yaml",
        r#"
entries:
  - source_fields: ["greeting", "names"]
    start: 1
    length: 3
"#,
    );

    let output = processor.execute(vec![serde_json::from_value(json!({
        "greeting": "¡Hola, señor!",
        "names": ["Zoë", "北京市朝阳区", ""],
    }))
    .unwrap()]);

    assert_eq!(output[0].get("greeting"), Some(&Value::from("Hol")));
    assert_eq!(
        output[0].get("names"),
        Some(&Value::List(vec![
            Value::from("oë"),
            Value::from("京市朝"),
            Value::from(""),
        ]))
    );
}

#[test]
fn test_unknown_config_key_rejected() {
    let (_dir, path) = write_rules(
        "rules.yaml",
        r#"
entries:
  - source_fields: ["message"]
    lenght: 3
"#,
    );
    let err = TruncateConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("lenght"));
}
