//! Existence checks against injected registries.

use crate::assert_error_message_contains;
use crate::common::CountingRegistry;
use serde_json::json;
use std::sync::Arc;
use stream_schema::payloads::{subscribe_schema, user_state_schema};
use stream_schema::{
    EntityKind, Field, FieldCodec, InMemoryRegistry, ValidationError, Validator,
    validate_connection_exists, validate_user_exists,
};

#[test]
fn test_point_predicates() {
    let connections = CountingRegistry::new(["c1"]);
    assert!(validate_connection_exists(&connections, "c1").is_ok());
    assert_error_message_contains!(
        validate_connection_exists(&connections, "c2"),
        "Unknown connection"
    );

    let users = CountingRegistry::new(["alice"]);
    assert_eq!(
        validate_user_exists(&users, "mallory"),
        Err(ValidationError::UnknownEntity {
            kind: EntityKind::User,
            identifier: "mallory".to_string()
        })
    );
}

#[test]
fn test_every_check_consults_the_registry() {
    let registry = Arc::new(CountingRegistry::new(["c1"]));
    let field = Field::string().validate(Validator::connection_exists(registry.clone()));

    for _ in 0..3 {
        assert!(field.deserialize(&json!("c1")).is_ok());
    }
    assert_eq!(registry.lookups(), 3);
}

#[test]
fn test_check_is_not_a_reservation() {
    let host = InMemoryRegistry::with_entries(["c1"]);
    let schema = subscribe_schema(Arc::new(host.clone())).unwrap();
    let payload = json!({"conn_id": "c1", "channels": ["lobby"]});

    assert!(schema.load(&payload).is_ok());
    host.remove("c1");
    assert_error_message_contains!(schema.load(&payload), "Validation failed");
    assert_eq!(
        schema.validate(&payload).to_json(),
        json!({"conn_id": ["Unknown connection"]})
    );
}

#[test]
fn test_type_failure_skips_lookup() {
    let registry = Arc::new(CountingRegistry::new(["alice"]));
    let schema = user_state_schema(registry.clone()).unwrap();

    let messages = schema.validate(&json!({"user": 42}));
    assert_eq!(messages.to_json(), json!({"user": ["Not a valid string."]}));
    assert_eq!(registry.lookups(), 0);
}
