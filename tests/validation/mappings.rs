//! Mapping field tests: fail-fast flat mappings and aggregating nested mappings.

use crate::common::fixtures::{SCALAR_MESSAGE, mixed_state};
use crate::common::init_logging;
use crate::expect_aggregate;
use serde_json::{Value, json};
use stream_schema::{
    Field, FieldCodec, FlatMappingField, NestedMappingField, ValidationError, ValidationResult,
    Validator,
};

/// Key codec renaming a single key and passing every other key through.
#[derive(Debug)]
struct RenameKey {
    from: &'static str,
    to: &'static str,
}

impl FieldCodec for RenameKey {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        match value.as_str() {
            Some(key) if key == self.to => Ok(json!(self.from)),
            _ => Ok(value.clone()),
        }
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        match raw.as_str() {
            Some(key) if key == self.from => Ok(json!(self.to)),
            _ => Ok(raw.clone()),
        }
    }
}

#[test]
fn test_flat_mapping_stops_at_first_bad_entry() {
    let err = FlatMappingField
        .deserialize(&json!({"a": 1, "b": [1, 2], "c": 2}))
        .unwrap_err();

    assert_eq!(err, ValidationError::invalid_entry("b"));
    assert!(!err.to_string().contains("'c'"));
    assert!(err.partial_data().is_none());
}

#[test]
fn test_flat_mapping_reports_only_first_of_several_bad_entries() {
    let err = Field::flat_mapping().deserialize(&mixed_state()).unwrap_err();
    assert_eq!(err, ValidationError::invalid_entry("history"));
}

#[test]
fn test_nested_without_sub_fields_is_passthrough() {
    let field = Field::mapping();
    let raw = mixed_state();
    assert_eq!(field.deserialize(&raw), Ok(raw));
    assert_eq!(
        field.deserialize(&json!("text")),
        Err(ValidationError::not_a_mapping())
    );
}

#[test]
fn test_mapping_null_handled_before_shape_check() {
    assert_eq!(
        Field::mapping().deserialize(&Value::Null),
        Err(ValidationError::NullNotAllowed)
    );
    assert_eq!(
        Field::nested_mapping(None, Some(Field::scalar())).deserialize(&Value::Null),
        Err(ValidationError::NullNotAllowed)
    );
    assert_eq!(
        Field::mapping().allow_null().deserialize(&Value::Null),
        Ok(Value::Null)
    );
}

#[test]
fn test_nested_scalar_values_keep_every_entry() {
    init_logging();
    let field = NestedMappingField::new(None, Some(Field::scalar()));
    let (messages, partial) = expect_aggregate!(field.deserialize(&json!({"a": 1, "b": [1, 2]})));

    assert_eq!(messages.to_json(), json!({"b": {"value": [SCALAR_MESSAGE]}}));
    assert_eq!(partial["a"], json!(1));
    assert_eq!(partial["b"], Value::Null);
    assert_eq!(partial.as_object().map(|m| m.len()), Some(2));
}

#[test]
fn test_nested_collects_every_failure() {
    let field = Field::nested_mapping(None, Some(Field::scalar()));
    let (messages, partial) = expect_aggregate!(field.deserialize(&mixed_state()));

    assert_eq!(
        messages.keys().collect::<Vec<_>>(),
        vec!["history", "prefs"]
    );
    assert_eq!(partial["name"], json!("alice"));
    assert_eq!(partial["note"], Value::Null);
    assert_eq!(partial.as_object().map(|m| m.len()), Some(7));
}

#[test]
fn test_value_error_keyed_by_transformed_key() {
    let field = Field::nested_mapping(
        Some(Field::custom(RenameKey { from: "x", to: "y" })),
        Some(Field::scalar().validate(Validator::one_of(vec![json!(1)]))),
    );
    let (messages, partial) = expect_aggregate!(field.deserialize(&json!({"x": 2, "w": 1})));

    assert!(messages.path(&["y", "value"]).is_some());
    assert!(messages.get("x").is_none());
    assert_eq!(partial, json!({"y": null, "w": 1}));
}

#[test]
fn test_key_error_keyed_by_original_key() {
    let field = Field::nested_mapping(
        Some(Field::string().validate(Validator::one_of(vec![json!("allowed")]))),
        Some(Field::integer()),
    );
    let (messages, partial) =
        expect_aggregate!(field.deserialize(&json!({"denied": 1, "allowed": 2})));

    assert_eq!(
        messages.to_json(),
        json!({"denied": {"key": ["Must be one of: allowed."]}})
    );
    assert_eq!(partial, json!({"denied": 1, "allowed": 2}));
}

#[test]
fn test_deep_nesting_builds_matching_error_tree() {
    let leaf = Field::nested_mapping(Some(Field::string()), Some(Field::integer()));
    let middle = Field::nested_mapping(None, Some(leaf));
    let field = Field::nested_mapping(None, Some(middle));

    let raw = json!({
        "room": {"counts": {"a": 1, "b": "two"}, "ok": {}},
        "hall": {"counts": {"c": 3}}
    });
    let (messages, partial) = expect_aggregate!(field.deserialize(&raw));

    let counts = json!({"counts": {"value": {"b": {"value": ["Not a valid integer."]}}}});
    assert_eq!(messages.to_json(), json!({"room": {"value": counts}}));
    assert_eq!(partial["room"]["counts"], json!({"a": 1, "b": null}));
    assert_eq!(partial["hall"], raw["hall"]);
}

#[test]
fn test_nested_serialize_inverts_key_transform() {
    let field = Field::nested_mapping(
        Some(Field::custom(RenameKey { from: "x", to: "y" })),
        None,
    );
    let loaded = field.deserialize(&json!({"x": 1})).unwrap();
    assert_eq!(loaded, json!({"y": 1}));
    assert_eq!(field.serialize(&loaded), Ok(json!({"x": 1})));
}

#[test]
fn test_renamed_key_collision_keeps_later_value() {
    let field = Field::nested_mapping(
        Some(Field::custom(RenameKey { from: "b", to: "a" })),
        Some(Field::scalar()),
    );
    let loaded = field.deserialize(&json!({"a": 1, "b": 2, "c": 3})).unwrap();

    assert_eq!(loaded, json!({"a": 2, "c": 3}));
    let keys: Vec<&String> = loaded.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["a", "c"]);
}

#[test]
fn test_renamed_key_collision_with_failing_value() {
    let field = Field::nested_mapping(
        Some(Field::custom(RenameKey { from: "b", to: "a" })),
        Some(Field::integer()),
    );
    let (messages, partial) = expect_aggregate!(field.deserialize(&json!({"a": "one", "b": 2})));

    assert_eq!(messages.to_json(), json!({"a": {"value": ["Not a valid integer."]}}));
    assert_eq!(partial, json!({"a": 2}));
}
