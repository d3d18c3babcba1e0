//! Core schema type definitions.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a schema treats input keys no field declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownFields {
    /// Copy undeclared keys into the record unchanged
    #[default]
    Include,
    /// Drop undeclared keys silently
    Exclude,
    /// Report each undeclared key as an error
    Reject,
}

/// Schema-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaConfig {
    /// Name used in logs and build errors
    pub name: String,
    /// Policy for undeclared input keys
    pub unknown: UnknownFields,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            name: "Schema".to_string(),
            unknown: UnknownFields::Include,
        }
    }
}

/// An ordered collection of named fields.
///
/// Built once through [`Schema::builder`] and shared across any number of
/// independent load/dump calls; it holds no per-call state.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) config: SchemaConfig,
    pub(crate) fields: Vec<(String, Field)>,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    /// Look up a field by attribute name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, field)| field)
    }

    /// Whether `key` names a field or a field's raw data key.
    pub fn declares(&self, key: &str) -> bool {
        self.fields
            .iter()
            .any(|(name, field)| name == key || field.raw_key() == Some(key))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A loaded record: declared attributes plus retained pass-through keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set an attribute, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.into_value()
    }
}
