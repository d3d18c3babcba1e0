//! Validators run against a field's value after it deserialized.
//!
//! Besides simple constraints ([`Validator::OneOf`], [`Validator::Length`]),
//! this module provides the existence checks against host registries. The
//! registry is injected at construction time; validators hold a shared,
//! read-only handle and nothing else.

use crate::error::{EntityKind, ValidationError, ValidationResult};
use crate::registry::Registry;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// A check attached to a [`Field`](crate::field::Field).
#[derive(Clone)]
pub enum Validator {
    /// Value must name an entity present in the registry
    Exists {
        kind: EntityKind,
        registry: Arc<dyn Registry>,
    },
    /// Value must equal one of the choices
    OneOf(Vec<Value>),
    /// Length bounds for strings (in characters), lists and mappings
    Length {
        min: Option<usize>,
        max: Option<usize>,
    },
}

impl Validator {
    /// Value must be a live connection id.
    pub fn connection_exists(registry: Arc<dyn Registry>) -> Self {
        Self::Exists {
            kind: EntityKind::Connection,
            registry,
        }
    }

    /// Value must be a known user name.
    pub fn user_exists(registry: Arc<dyn Registry>) -> Self {
        Self::Exists {
            kind: EntityKind::User,
            registry,
        }
    }

    pub fn one_of(choices: Vec<Value>) -> Self {
        Self::OneOf(choices)
    }

    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self::Length { min, max }
    }

    /// Run the check.
    pub fn check(&self, value: &Value) -> ValidationResult<()> {
        match self {
            Self::Exists { kind, registry } => match value {
                Value::String(identifier) => validate_exists(registry.as_ref(), *kind, identifier),
                other => Err(ValidationError::unknown_entity(*kind, other.to_string())),
            },
            Self::OneOf(choices) => {
                if choices.contains(value) {
                    Ok(())
                } else {
                    let listed = choices
                        .iter()
                        .map(|choice| match choice {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect::<Vec<_>>()
                        .join(", ");
                    Err(ValidationError::constraint(format!("Must be one of: {listed}.")))
                }
            }
            Self::Length { min, max } => {
                let Some(len) = measure(value) else {
                    return Err(ValidationError::constraint("Value has no length."));
                };
                if let Some(min) = min.filter(|min| len < *min) {
                    return Err(ValidationError::constraint(format!(
                        "Shorter than minimum length {min}."
                    )));
                }
                if let Some(max) = max.filter(|max| len > *max) {
                    return Err(ValidationError::constraint(format!(
                        "Longer than maximum length {max}."
                    )));
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exists { kind, .. } => f.debug_struct("Exists").field("kind", kind).finish(),
            Self::OneOf(choices) => f.debug_tuple("OneOf").field(choices).finish(),
            Self::Length { min, max } => f
                .debug_struct("Length")
                .field("min", min)
                .field("max", max)
                .finish(),
        }
    }
}

fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(entries) => Some(entries.len()),
        _ => None,
    }
}

fn validate_exists(
    registry: &dyn Registry,
    kind: EntityKind,
    identifier: &str,
) -> ValidationResult<()> {
    if registry.exists(identifier) {
        Ok(())
    } else {
        Err(ValidationError::unknown_entity(kind, identifier))
    }
}

/// Fail with `Unknown connection` unless `conn_id` is in the connection registry.
pub fn validate_connection_exists(registry: &dyn Registry, conn_id: &str) -> ValidationResult<()> {
    validate_exists(registry, EntityKind::Connection, conn_id)
}

/// Fail with `Unknown user` unless `username` is in the user registry.
pub fn validate_user_exists(registry: &dyn Registry, username: &str) -> ValidationResult<()> {
    validate_exists(registry, EntityKind::User, username)
}
