//! Schema-level tests: aggregation across fields and pass-through of undeclared keys.

use crate::common::fixtures::{SCALAR_MESSAGE, bad_user_state_payload, connect_payload};
use crate::common::init_logging;
use crate::{assert_validation_success, expect_aggregate};
use serde_json::{Value, json};
use stream_schema::payloads::connect_schema;
use stream_schema::{Field, Record, Schema};

fn state_schema() -> Schema {
    Schema::builder("State")
        .field("state", Field::nested_mapping(None, Some(Field::scalar())))
        .build()
        .expect("Failed to build schema")
}

#[test]
fn test_declared_error_and_undeclared_pass_through() {
    init_logging();
    let schema = state_schema();
    let (messages, partial) = expect_aggregate!(schema.load(&json!({
        "state": {"ok": 1, "bad": [1]},
        "client_hint": {"any": ["thing"]}
    })));

    assert_eq!(
        messages.to_json(),
        json!({"state": {"bad": {"value": [SCALAR_MESSAGE]}}})
    );
    assert_eq!(partial["client_hint"], json!({"any": ["thing"]}));
    assert_eq!(partial["state"], json!({"ok": 1, "bad": null}));
}

#[test]
fn test_undeclared_keys_survive_successful_load() {
    let schema = state_schema();
    let record = schema
        .load(&json!({"state": {}, "extra": 5}))
        .expect("valid payload");
    assert_eq!(record.get("extra"), Some(&json!(5)));
}

#[test]
fn test_connect_payload_round_trip() {
    let schema = connect_schema().unwrap();
    let payload = connect_payload();

    let record = schema.load(&payload).expect("connect payload loads");
    assert_eq!(record.get("username"), Some(&json!("alice")));
    assert!(record.get("conn_id").and_then(Value::as_str).is_some());

    let dumped = schema.dump(&record).unwrap();
    for key in ["username", "channels", "user_state", "channel_configs", "info"] {
        assert_eq!(dumped.get(key), payload.get(key), "attribute {key}");
    }
}

#[test]
fn test_connect_reports_all_problems_at_once() {
    let schema = connect_schema().unwrap();
    let (messages, _) = expect_aggregate!(schema.load(&json!({
        "channels": "lobby",
        "fresh_user_state": {"tags": []},
        "channel_configs": {"lobby": 1}
    })));

    let keys: Vec<&str> = messages.keys().collect();
    assert_eq!(
        keys,
        vec!["channel_configs", "channels", "fresh_user_state", "username"]
    );
    assert!(messages.path(&["channel_configs", "lobby", "value"]).is_some());
}

#[test]
fn test_flat_state_field_in_schema() {
    let schema = Schema::builder("UserState")
        .field("user", Field::string().required())
        .field("user_state", Field::flat_mapping())
        .build()
        .unwrap();

    let (messages, partial) = expect_aggregate!(schema.load(&bad_user_state_payload()));
    assert_eq!(
        messages.to_json(),
        json!({"user_state": ["'tags' key is not type of string, integer, boolean or float."]})
    );
    // Fail-fast fields carry no partial data, so the attribute is absent.
    assert!(partial.get("user_state").is_none());
    assert_eq!(partial["state_public_keys"], json!(["color"]));
}

#[test]
fn test_dump_emits_loaded_record() {
    init_logging();
    let schema = state_schema();
    let mut record = Record::new();
    record.insert("state", json!({"a": 1}));
    record.insert("retained", json!("x"));

    assert_validation_success!(schema.dump(&record));
    let dumped = schema.dump(&record).unwrap();
    assert_eq!(Value::Object(dumped), json!({"state": {"a": 1}, "retained": "x"}));
}

#[test]
fn test_schema_shared_across_threads() {
    fn assert_shareable<T: Send + Sync>() {}
    assert_shareable::<Schema>();
    assert_shareable::<Field>();

    let schema = std::sync::Arc::new(state_schema());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let schema = schema.clone();
            std::thread::spawn(move || schema.load(&json!({"state": {"n": i}})).is_ok())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
