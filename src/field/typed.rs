//! Typed leaf fields and the list field.
//!
//! Leaves check the JSON type and never coerce: `"12"` is not an integer and
//! `1` is not a boolean.

use super::{Field, FieldCodec};
use crate::error::{ErrorMessages, ValidationError, ValidationResult};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringField;

impl FieldCodec for StringField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        match raw {
            Value::String(_) => Ok(raw.clone()),
            _ => Err(ValidationError::invalid_type("string")),
        }
    }
}

/// Whole numbers, signed or unsigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerField;

impl FieldCodec for IntegerField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        if raw.is_i64() || raw.is_u64() {
            Ok(raw.clone())
        } else {
            Err(ValidationError::invalid_type("integer"))
        }
    }
}

/// Any JSON number; integers are accepted as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatField;

impl FieldCodec for FloatField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        match raw {
            Value::Number(_) => Ok(raw.clone()),
            _ => Err(ValidationError::invalid_type("number")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanField;

impl FieldCodec for BooleanField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        match raw {
            Value::Bool(_) => Ok(raw.clone()),
            _ => Err(ValidationError::invalid_type("boolean")),
        }
    }
}

/// Sequence whose items all go through one sub-field.
///
/// Like [`NestedMappingField`](super::NestedMappingField), every item is
/// checked; failures are keyed by index and failing items are replaced by
/// their partial data.
#[derive(Debug, Clone)]
pub struct ListField {
    items: Box<Field>,
}

impl ListField {
    pub fn new(items: Field) -> Self {
        Self {
            items: Box::new(items),
        }
    }

    pub fn items(&self) -> &Field {
        &self.items
    }
}

impl FieldCodec for ListField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| self.items.serialize(item))
                .collect::<ValidationResult<Vec<_>>>()
                .map(Value::Array),
            _ => Err(ValidationError::InvalidShape { expected: "list" }),
        }
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        let items = raw
            .as_array()
            .ok_or(ValidationError::InvalidShape { expected: "list" })?;

        let mut errors = ErrorMessages::new();
        let mut failed = false;
        let mut result = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match self.items.deserialize(item) {
                Ok(value) => result.push(value),
                Err(err) => {
                    failed = true;
                    let (messages, partial) = err.into_parts();
                    errors.insert(idx.to_string(), messages);
                    result.push(partial);
                }
            }
        }

        if failed {
            Err(ValidationError::aggregate(errors, Value::Array(result)))
        } else {
            Ok(Value::Array(result))
        }
    }
}
