//! Builder for [`Schema`] declarations.

use super::types::{Schema, SchemaConfig, UnknownFields};
use crate::error::{BuildError, BuildResult};
use crate::field::Field;
use std::collections::HashSet;

/// Collects fields in declaration order and checks the declaration on build.
///
/// # Examples
///
/// ```rust
/// use stream_schema::field::Field;
/// use stream_schema::schema::{Schema, UnknownFields};
///
/// let schema = Schema::builder("Message")
///     .unknown(UnknownFields::Exclude)
///     .field("channel", Field::string().required())
///     .field("message", Field::mapping())
///     .build()
///     .expect("valid declaration");
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    config: SchemaConfig,
    fields: Vec<(String, Field)>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: SchemaConfig {
                name: name.into(),
                ..SchemaConfig::default()
            },
            fields: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn unknown(mut self, policy: UnknownFields) -> Self {
        self.config.unknown = policy;
        self
    }

    /// Declare a field. Order of declaration is the order of output.
    pub fn field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.fields.push((name.into(), field));
        self
    }

    pub fn build(self) -> BuildResult<Schema> {
        let mut seen = HashSet::new();
        for (name, field) in &self.fields {
            if field.is_required() && field.default_value().is_some() {
                return Err(BuildError::RequiredWithDefault { name: name.clone() });
            }
            if field.is_load_only() && field.is_dump_only() {
                return Err(BuildError::LoadAndDumpOnly { name: name.clone() });
            }

            let mut keys = vec![name.as_str()];
            if let Some(raw_key) = field.raw_key().filter(|raw| *raw != name.as_str()) {
                keys.push(raw_key);
            }
            for key in keys {
                if !seen.insert(key) {
                    return Err(BuildError::DuplicateField {
                        schema: self.config.name.clone(),
                        name: key.to_string(),
                    });
                }
            }
        }

        Ok(Schema {
            config: self.config,
            fields: self.fields,
        })
    }
}

impl Schema {
    /// Start declaring a schema.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }
}
