//! Schema load/dump logic.
//!
//! Loading goes field by field in declaration order and never stops at a
//! failing field. Each failure is stored under the field name; aggregate
//! failures still contribute their partial data to the record. Undeclared
//! input keys are handled afterwards according to [`UnknownFields`].

use super::types::{Record, Schema, UnknownFields};
use crate::error::{ErrorMessages, ValidationError, ValidationResult};
use crate::field::FieldCodec;
use log::{debug, trace};
use serde_json::{Map, Value};

impl Schema {
    /// Validate `raw` and build a typed record.
    ///
    /// On failure the error is an aggregate whose messages are keyed by field
    /// name and whose data is the partial record.
    pub fn load(&self, raw: &Value) -> ValidationResult<Record> {
        let input = raw.as_object().ok_or_else(ValidationError::not_a_mapping)?;

        let mut record = Map::new();
        let mut errors = ErrorMessages::new();
        let mut failed = false;

        for (name, field) in &self.fields {
            if field.is_dump_only() {
                continue;
            }
            let raw_key = field.raw_key().unwrap_or(name);

            let Some(value) = input.get(raw_key) else {
                if field.is_required() {
                    failed = true;
                    errors.insert(name.as_str(), ValidationError::MissingRequired.into_messages());
                } else if let Some(default) = field.default_value() {
                    record.insert(name.clone(), default.get());
                }
                continue;
            };

            match field.deserialize(value) {
                Ok(value) => {
                    record.insert(name.clone(), value);
                }
                Err(err) => {
                    failed = true;
                    let partial = err.partial_data().cloned();
                    errors.insert(name.as_str(), err.into_messages());
                    if let Some(partial) = partial {
                        record.insert(name.clone(), partial);
                    }
                }
            }
        }

        for (key, value) in input {
            if self.declares(key) {
                continue;
            }
            match self.config.unknown {
                UnknownFields::Include => {
                    trace!("{}: passing through undeclared key '{}'", self.config.name, key);
                    record.insert(key.clone(), value.clone());
                }
                UnknownFields::Exclude => {
                    trace!("{}: dropping undeclared key '{}'", self.config.name, key);
                }
                UnknownFields::Reject => {
                    failed = true;
                    let error = ValidationError::unknown_field(key.as_str());
                    errors.insert(key.as_str(), error.into_messages());
                }
            }
        }

        if failed {
            debug!("{}: load failed for {} fields", self.config.name, errors.len());
            Err(ValidationError::aggregate(errors, Value::Object(record)))
        } else {
            debug!("{}: loaded {} attributes", self.config.name, record.len());
            Ok(Record::from(record))
        }
    }

    /// Emit a record as a raw mapping.
    ///
    /// Declared attributes are serialized by their field and written under
    /// their raw key; pass-through attributes are copied unchanged. Output
    /// follows the record's order.
    pub fn dump(&self, record: &Record) -> ValidationResult<Map<String, Value>> {
        let mut output = Map::new();
        let mut errors = ErrorMessages::new();
        let mut failed = false;

        for (name, value) in record.iter() {
            let Some(field) = self.field(name) else {
                output.insert(name.clone(), value.clone());
                continue;
            };
            if field.is_load_only() {
                continue;
            }
            let raw_key = field.raw_key().unwrap_or(name);
            match field.serialize(value) {
                Ok(serialized) => {
                    output.insert(raw_key.to_string(), serialized);
                }
                Err(err) => {
                    failed = true;
                    errors.insert(name.as_str(), err.into_messages());
                }
            }
        }

        if failed {
            debug!("{}: dump failed for {} fields", self.config.name, errors.len());
            Err(ValidationError::aggregate(errors, Value::Object(output)))
        } else {
            debug!("{}: dumped {} attributes", self.config.name, output.len());
            Ok(output)
        }
    }

    /// Validate `raw` without keeping the record.
    ///
    /// Returns the error tree, empty when the input is valid.
    pub fn validate(&self, raw: &Value) -> ErrorMessages {
        match self.load(raw) {
            Ok(_) => ErrorMessages::new(),
            Err(err) => err.into_messages(),
        }
    }
}
