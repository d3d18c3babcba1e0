//! Primitive-only field.

use super::FieldCodec;
use crate::error::{ValidationError, ValidationResult};
use serde_json::Value;

/// Field restricted to strings, booleans, integers, floats and null.
///
/// Composite values (sequences, mappings) are rejected. Nothing is coerced:
/// a numeric string stays a string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarField;

impl ScalarField {
    /// True when `value` is one of the accepted primitive types.
    pub fn accepts(value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
            Value::Array(_) | Value::Object(_) => false,
        }
    }
}

impl FieldCodec for ScalarField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        if Self::accepts(raw) {
            Ok(raw.clone())
        } else {
            Err(ValidationError::invalid_value())
        }
    }
}
