//! Mapping field with optional key and value sub-fields.
//!
//! Entries are processed in two passes over the same positional key and
//! value lists:
//!
//! 1. **Key pass**: each key goes through the key sub-field. A transformed
//!    key replaces the original; a failing key stays as it was and its
//!    messages are filed under `errors[original_key]["key"]`.
//! 2. **Value pass**: each value goes through the value sub-field. A failing
//!    value is replaced by the partial data its error carried, and its
//!    messages are filed under `errors[key]["value"]`, where `key` is the
//!    entry key *after* the key pass. A successfully transformed key
//!    therefore indexes the value error by its new name.
//!
//! The result is rebuilt from both lists in the original entry order. When
//! anything failed, the call returns an aggregate error whose data is that
//! partial result; no entry is ever dropped.

use super::{Field, FieldCodec};
use crate::error::{ErrorMessages, ValidationError, ValidationResult};
use log::trace;
use serde_json::{Map, Value};

const KEY: &str = "key";
const VALUE: &str = "value";

/// Mapping validated entry by entry, aggregating every failure.
///
/// With neither sub-field configured the mapping passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct NestedMappingField {
    keys: Option<Box<Field>>,
    values: Option<Box<Field>>,
}

impl NestedMappingField {
    pub fn new(keys: Option<Field>, values: Option<Field>) -> Self {
        Self {
            keys: keys.map(Box::new),
            values: values.map(Box::new),
        }
    }

    /// Accept any mapping without looking inside it.
    pub fn passthrough() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Option<&Field> {
        self.keys.as_deref()
    }

    pub fn values(&self) -> Option<&Field> {
        self.values.as_deref()
    }

    pub fn is_passthrough(&self) -> bool {
        self.keys.is_none() && self.values.is_none()
    }
}

/// Mapping keys are strings; other key values use their JSON text.
fn into_key(value: Value) -> String {
    match value {
        Value::String(key) => key,
        other => other.to_string(),
    }
}

impl FieldCodec for NestedMappingField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        if value.is_null() {
            return Ok(Value::Null);
        }
        if self.is_passthrough() {
            return Ok(value.clone());
        }
        let mapping = value.as_object().ok_or_else(ValidationError::not_a_mapping)?;

        let mut result = Map::with_capacity(mapping.len());
        for (key, item) in mapping {
            let key = match &self.keys {
                Some(field) => into_key(field.serialize(&Value::String(key.clone()))?),
                None => key.clone(),
            };
            let item = match &self.values {
                Some(field) => field.serialize(item)?,
                None => item.clone(),
            };
            result.insert(key, item);
        }
        Ok(Value::Object(result))
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        let mapping = raw.as_object().ok_or_else(ValidationError::not_a_mapping)?;
        if self.is_passthrough() {
            return Ok(raw.clone());
        }

        let mut errors = ErrorMessages::new();
        let mut failed = false;
        let mut keys: Vec<String> = mapping.keys().cloned().collect();
        let mut values: Vec<Value> = mapping.values().cloned().collect();

        if let Some(key_field) = &self.keys {
            trace!("validating {} mapping keys", keys.len());
            for (idx, original) in mapping.keys().enumerate() {
                match key_field.deserialize(&Value::String(original.clone())) {
                    Ok(key) => keys[idx] = into_key(key),
                    Err(err) => {
                        failed = true;
                        errors.nest(original.as_str()).insert(KEY, err.into_messages());
                    }
                }
            }
        }

        if let Some(value_field) = &self.values {
            trace!("validating {} mapping values", values.len());
            for (idx, item) in mapping.values().enumerate() {
                match value_field.deserialize(item) {
                    Ok(value) => values[idx] = value,
                    Err(err) => {
                        failed = true;
                        let (messages, partial) = err.into_parts();
                        values[idx] = partial;
                        errors.nest(keys[idx].as_str()).insert(VALUE, messages);
                    }
                }
            }
        }

        let result: Map<String, Value> = keys.into_iter().zip(values).collect();

        if failed {
            trace!("mapping failed for {} entries", errors.len());
            Err(ValidationError::aggregate(errors, Value::Object(result)))
        } else {
            Ok(Value::Object(result))
        }
    }
}
