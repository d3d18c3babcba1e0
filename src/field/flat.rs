//! Mapping of primitive values, checked fail-fast.

use super::{FieldCodec, ScalarField};
use crate::error::{ValidationError, ValidationResult};
use serde_json::Value;

/// Mapping whose values must each be a primitive.
///
/// Entries are checked in order and the first offending entry fails the
/// whole call with its key; later entries are not looked at. Use
/// [`NestedMappingField`](super::NestedMappingField) to collect every
/// problem instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlatMappingField;

impl FieldCodec for FlatMappingField {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        Ok(value.clone())
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        let mapping = raw.as_object().ok_or_else(ValidationError::not_a_mapping)?;

        if let Some((key, _)) = mapping.iter().find(|(_, value)| !ScalarField::accepts(value)) {
            return Err(ValidationError::invalid_entry(key.as_str()));
        }

        Ok(raw.clone())
    }
}
