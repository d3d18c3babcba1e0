//! Error types for field and schema validation.
//!
//! Validation never stops at the first problem inside a mapping or a schema.
//! Leaf failures are reported as single-message errors, and every aggregating
//! component (mapping fields, list fields, schemas) folds them into an
//! [`ErrorMessages`] tree that mirrors the shape of the input, together with
//! the best-effort data that did validate.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of host-owned entity an existence check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// A live connection in the host's connection table
    Connection,
    /// A user in the host's user table
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => write!(f, "connection"),
            Self::User => write!(f, "user"),
        }
    }
}

/// Structured error-message tree.
///
/// Leaves are lists of human-readable messages. Internal nodes map a field
/// name (schema level), an entry key (mapping level), an index (list level)
/// or one of `"key"`/`"value"` to a sub-tree. Serializes to the plain JSON
/// shape clients receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    /// Messages reported by a leaf field
    List(Vec<String>),
    /// Messages keyed by field name, entry key or index
    Nested(BTreeMap<String, ErrorMessages>),
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::Nested(BTreeMap::new())
    }
}

impl ErrorMessages {
    /// Create an empty nested node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaf holding a single message.
    pub fn message(message: impl Into<String>) -> Self {
        Self::List(vec![message.into()])
    }

    /// True when no message has been recorded anywhere in the tree.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(messages) => messages.is_empty(),
            Self::Nested(children) => children.values().all(ErrorMessages::is_empty),
        }
    }

    /// Number of direct entries: messages for a leaf, children for a node.
    pub fn len(&self) -> usize {
        match self {
            Self::List(messages) => messages.len(),
            Self::Nested(children) => children.len(),
        }
    }

    /// Get a direct child of a nested node.
    pub fn get(&self, key: &str) -> Option<&ErrorMessages> {
        match self {
            Self::Nested(children) => children.get(key),
            Self::List(_) => None,
        }
    }

    /// Follow a path of keys from this node.
    pub fn path(&self, keys: &[&str]) -> Option<&ErrorMessages> {
        keys.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Messages of a leaf node.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(messages) => Some(messages),
            Self::Nested(_) => None,
        }
    }

    /// Iterate over the keys of a nested node.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let children = match self {
            Self::Nested(children) => Some(children),
            Self::List(_) => None,
        };
        children.into_iter().flat_map(|c| c.keys().map(String::as_str))
    }

    /// Set `key` to `messages`, replacing any previous sub-tree.
    ///
    /// A leaf is turned into a nested node first; its messages are dropped.
    pub fn insert(&mut self, key: impl Into<String>, messages: ErrorMessages) {
        self.children_mut().insert(key.into(), messages);
    }

    /// Get the nested child under `key`, creating an empty one if needed.
    pub fn nest(&mut self, key: impl Into<String>) -> &mut ErrorMessages {
        self.children_mut().entry(key.into()).or_default()
    }

    /// Render the tree as JSON.
    pub fn to_json(&self) -> Value {
        match self {
            Self::List(messages) => Value::from(messages.clone()),
            Self::Nested(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, sub)| (key.clone(), sub.to_json()))
                    .collect(),
            ),
        }
    }

    fn children_mut(&mut self) -> &mut BTreeMap<String, ErrorMessages> {
        if let Self::List(_) = self {
            *self = Self::Nested(BTreeMap::new());
        }
        match self {
            Self::Nested(children) => children,
            Self::List(_) => unreachable!("leaf was replaced by a nested node above"),
        }
    }
}

/// Validation errors produced by fields, validators and schemas.
///
/// The `Display` text of each leaf variant is the client-facing message for
/// that kind of failure. [`ValidationError::Aggregate`] is the only variant
/// carrying partial data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Value is not the expected container kind
    #[error("Not a valid {expected} type.")]
    InvalidShape { expected: &'static str },

    /// Value is not one of the accepted primitive types
    #[error("{}", describe_invalid_value(.key))]
    InvalidValue { key: Option<String> },

    /// Value does not have the type a typed leaf field expects
    #[error("Not a valid {expected}.")]
    InvalidType { expected: &'static str },

    /// Required field is absent from the input
    #[error("Missing data for required field.")]
    MissingRequired,

    /// Explicit null for a field that does not allow it
    #[error("Field may not be null.")]
    NullNotAllowed,

    /// Undeclared input field under a rejecting schema
    #[error("Unknown field '{name}'.")]
    UnknownField { name: String },

    /// Value violates a validator constraint
    #[error("{message}")]
    Constraint { message: String },

    /// External existence check failed
    #[error("Unknown {kind}")]
    UnknownEntity { kind: EntityKind, identifier: String },

    /// Several failures collected by a mapping, list or schema
    #[error("Validation failed for {} entries", .messages.len())]
    Aggregate { messages: ErrorMessages, data: Value },
}

fn describe_invalid_value(key: &Option<String>) -> String {
    match key {
        Some(key) => format!("'{key}' key is not type of string, integer, boolean or float."),
        None => "Value is not type of string, integer, boolean or float.".to_string(),
    }
}

impl ValidationError {
    /// Create the error for a value that is not a mapping
    pub fn not_a_mapping() -> Self {
        Self::InvalidShape { expected: "mapping" }
    }

    /// Create an invalid value error outside any mapping context
    pub fn invalid_value() -> Self {
        Self::InvalidValue { key: None }
    }

    /// Create an invalid value error tagged with the offending entry key
    pub fn invalid_entry(key: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: Some(key.into()),
        }
    }

    /// Create an invalid type error for a typed leaf
    pub fn invalid_type(expected: &'static str) -> Self {
        Self::InvalidType { expected }
    }

    /// Create the error for an undeclared input field
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Create a constraint violation error
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Create an unknown entity error
    pub fn unknown_entity(kind: EntityKind, identifier: impl Into<String>) -> Self {
        Self::UnknownEntity {
            kind,
            identifier: identifier.into(),
        }
    }

    /// Create an aggregate error from a message tree and its partial data
    pub fn aggregate(messages: ErrorMessages, data: Value) -> Self {
        Self::Aggregate { messages, data }
    }

    /// The message tree for this error.
    pub fn messages(&self) -> ErrorMessages {
        match self {
            Self::Aggregate { messages, .. } => messages.clone(),
            leaf => ErrorMessages::message(leaf.to_string()),
        }
    }

    /// Consume the error, returning its message tree.
    pub fn into_messages(self) -> ErrorMessages {
        match self {
            Self::Aggregate { messages, .. } => messages,
            leaf => ErrorMessages::message(leaf.to_string()),
        }
    }

    /// Best-effort partial data, if this error carries any.
    pub fn partial_data(&self) -> Option<&Value> {
        match self {
            Self::Aggregate { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Consume the error, returning its partial data (`null` for leaf errors).
    pub fn into_data(self) -> Value {
        match self {
            Self::Aggregate { data, .. } => data,
            _ => Value::Null,
        }
    }

    /// Split the error into its message tree and partial data.
    pub fn into_parts(self) -> (ErrorMessages, Value) {
        match self {
            Self::Aggregate { messages, data } => (messages, data),
            leaf => (ErrorMessages::message(leaf.to_string()), Value::Null),
        }
    }

    /// True for errors collected from several sub-failures.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate { .. })
    }
}

/// Errors raised while declaring a schema.
///
/// These are programming errors and should surface during development.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Two fields share a name or raw data key
    #[error("Duplicate field '{name}' in schema '{schema}'")]
    DuplicateField { schema: String, name: String },

    /// A required field also declares a load default
    #[error("Field '{name}' is required and cannot declare a load default")]
    RequiredWithDefault { name: String },

    /// A field is both load-only and dump-only
    #[error("Field '{name}' cannot be both load-only and dump-only")]
    LoadAndDumpOnly { name: String },
}

// Result type aliases for convenience
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type BuildResult<T> = Result<T, BuildError>;
