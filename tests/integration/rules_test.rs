//! Rule ordering, condition failures and payload sizes through the Rhai evaluator.

use serde_json::json;
use std::sync::Arc;
use tf_expression::RhaiEvaluator;
use tf_traits::{CollectingSink, Processor};
use tf_truncate::{Rule, TruncateConfig, TruncateProcessor};
use tf_types::{Event, Value};

fn event(value: serde_json::Value) -> Event {
    serde_json::from_value(value).unwrap()
}

fn processor(yaml: &str) -> TruncateProcessor {
    let config = TruncateConfig::from_yaml_str(yaml).unwrap();
    TruncateProcessor::from_config(&config, Arc::new(RhaiEvaluator::new())).unwrap()
}

#[test]
fn test_rules_compose_in_order() {
    let p = processor(
        r#"
entries:
  - source_fields: ["message"]
    length: 8
  - source_fields: ["message"]
    start: 2
  - source_fields: ["message"]
    length: 3
"#,
    );
    let out = p.execute(vec![event(json!({"message": "0123456789"}))]);
    assert_eq!(out[0].get("message"), Some(&Value::from("234")));
}

#[test]
fn test_later_condition_sees_earlier_truncation() {
    let p = processor(
        r#"
entries:
  - source_fields: ["message"]
    length: 4
  - source_fields: ["message"]
    condition: 'message == "abcd"'
    start: 3
"#,
    );
    let out = p.execute(vec![event(json!({"message": "abcdef"}))]);
    assert_eq!(out[0].get("message"), Some(&Value::from("d")));
}

#[test]
fn test_list_of_mixed_values() {
    let p = processor(
        r#"
entries:
  - source_fields: ["tags"]
    condition: "tags.len() == 4"
    length: 2
"#,
    );
    let out = p.execute(vec![event(json!({"tags": ["abcde", "wx", 123, ["nested"]]}))]);
    assert_eq!(out[0], event(json!({"tags": ["ab", "wx", 123, ["nested"]]})));
}

#[test]
fn test_non_boolean_condition_fails_event() {
    let sink = Arc::new(CollectingSink::new());
    let p = TruncateProcessor::from_config(
        &TruncateConfig::new(vec![Rule::new(["message"])
            .with_condition("status")
            .with_length(1)]),
        Arc::new(RhaiEvaluator::new()),
    )
    .unwrap()
    .with_sink(sink.clone());

    let out = p.execute(vec![event(json!({"status": 200, "message": "abc"}))]);
    assert_eq!(out[0].get("message"), Some(&Value::from("abc")));
    assert!(sink.failures()[0].message.contains("expected bool"));
}

#[test]
fn test_invalid_condition_rejected_at_load() {
    let config = TruncateConfig::from_yaml_str(
        r#"
entries:
  - source_fields: ["message"]
  - source_fields: ["message"]
    condition: "status == "
"#,
    )
    .unwrap();
    let err = TruncateProcessor::from_config(&config, Arc::new(RhaiEvaluator::new())).unwrap_err();
    assert!(err.to_string().contains("entry 1"));
}

#[test]
fn test_condition_on_large_message() {
    let sink = Arc::new(CollectingSink::new());
    let p = processor(
        r#"
entries:
  - source_fields: ["message"]
    condition: "length(message) > 1000"
    length: 16
"#,
    )
    .with_sink(sink.clone());

    let huge = "0123456789abcdef".repeat(150_000);
    let mut batch = vec![
        event(json!({"message": huge})),
        event(json!({"message": "short"})),
    ];
    let report = p.process_batch(&mut batch);

    assert!(report.is_clean(), "{:?}", sink.failures());
    assert_eq!(batch[0].get("message"), Some(&Value::from("0123456789abcdef")));
    assert_eq!(batch[1].get("message"), Some(&Value::from("short")));
}

#[test]
fn test_condition_on_large_list() {
    let p = processor(
        r#"
entries:
  - source_fields: ["ids"]
    condition: "ids.len() > 10000"
    length: 1
"#,
    );

    let ids: Vec<String> = (0..20_000).map(|i| format!("id-{i}")).collect();
    let mut batch = vec![event(json!({"ids": ids}))];
    let report = p.process_batch(&mut batch);

    assert!(report.is_clean());
    assert_eq!(report.values_truncated(), 20_000);
    match batch[0].get("ids") {
        Some(Value::List(items)) => assert!(items.iter().all(|v| v == &Value::from("i"))),
        other => panic!("unexpected ids {other:?}"),
    }
}

#[test]
fn test_shared_processor_across_threads() {
    let p = Arc::new(processor(
        r#"
entries:
  - source_fields: ["message"]
    condition: "n % 2 == 0"
    length: 1
"#,
    ));

    let handles: Vec<_> = (0..4i64)
        .map(|n| {
            let p = Arc::clone(&p);
            std::thread::spawn(move || p.execute(vec![event(json!({"n": n, "message": "xyz"}))]))
        })
        .collect();

    let messages: Vec<Value> = handles
        .into_iter()
        .map(|h| h.join().unwrap()[0].get("message").cloned().unwrap())
        .collect();
    assert_eq!(
        messages,
        vec![
            Value::from("x"),
            Value::from("xyz"),
            Value::from("x"),
            Value::from("xyz"),
        ]
    );
}
