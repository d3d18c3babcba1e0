//! Field definitions: the unit of type-restricted validation and serialization.
//!
//! Every concrete field implements [`FieldCodec`], the serialize/deserialize
//! capability. [`FieldKind`] is the closed set of field variants the engine
//! dispatches over, and [`Field`] wraps a kind with its declaration options
//! (required-ness, load default, null handling, attached validators).
//!
//! # Examples
//!
//! ```rust
//! use stream_schema::field::{Field, FieldCodec};
//! use serde_json::json;
//!
//! let state = Field::nested_mapping(Some(Field::string()), Some(Field::scalar()));
//! let loaded = state.deserialize(&json!({"color": "red", "score": 3})).unwrap();
//! assert_eq!(loaded, json!({"color": "red", "score": 3}));
//!
//! let err = state.deserialize(&json!({"tags": ["a"]})).unwrap_err();
//! assert_eq!(err.messages().to_json(), json!({"tags": {"value": [
//!     "Value is not type of string, integer, boolean or float."
//! ]}}));
//! ```

pub mod flat;
pub mod nested;
pub mod scalar;
pub mod typed;

pub use flat::FlatMappingField;
pub use nested::NestedMappingField;
pub use scalar::ScalarField;
pub use typed::{BooleanField, FloatField, IntegerField, ListField, StringField};

use crate::error::{ValidationError, ValidationResult};
use crate::validators::Validator;
use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

/// Serialize/deserialize capability shared by every field variant.
///
/// Implementations hold configuration only and keep no per-call state, so a
/// single instance can serve many concurrent calls.
pub trait FieldCodec: Debug + Send + Sync {
    /// Convert a typed value back into its raw form.
    fn serialize(&self, value: &Value) -> ValidationResult<Value>;

    /// Validate a raw value and convert it into its typed form.
    fn deserialize(&self, raw: &Value) -> ValidationResult<Value>;
}

/// Closed set of field variants.
///
/// `Custom` is the extension point for host-defined codecs such as key
/// normalisers; everything else is handled by the engine itself.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Scalar(ScalarField),
    FlatMapping(FlatMappingField),
    NestedMapping(NestedMappingField),
    String(StringField),
    Integer(IntegerField),
    Float(FloatField),
    Boolean(BooleanField),
    List(ListField),
    Custom(Arc<dyn FieldCodec>),
}

impl FieldKind {
    /// The codec implementing this variant.
    pub fn codec(&self) -> &dyn FieldCodec {
        match self {
            Self::Scalar(field) => field,
            Self::FlatMapping(field) => field,
            Self::NestedMapping(field) => field,
            Self::String(field) => field,
            Self::Integer(field) => field,
            Self::Float(field) => field,
            Self::Boolean(field) => field,
            Self::List(field) => field,
            Self::Custom(codec) => codec.as_ref(),
        }
    }

    /// Short type name used in logs and diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::FlatMapping(_) => "flatMapping",
            Self::NestedMapping(_) => "nestedMapping",
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::List(_) => "list",
            Self::Custom(_) => "custom",
        }
    }

    /// Whether the variant itself treats an explicit null as valid input.
    fn accepts_null(&self) -> bool {
        match self {
            Self::Scalar(_) | Self::Custom(_) => true,
            Self::FlatMapping(_)
            | Self::NestedMapping(_)
            | Self::String(_)
            | Self::Integer(_)
            | Self::Float(_)
            | Self::Boolean(_)
            | Self::List(_) => false,
        }
    }
}

/// Value used when a declared field is absent from the input.
#[derive(Debug, Clone)]
pub enum LoadDefault {
    /// A fixed value, cloned per load
    Value(Value),
    /// A generator called per load (e.g. fresh identifiers)
    Generated(fn() -> Value),
}

impl LoadDefault {
    /// Produce the default value.
    pub fn get(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Generated(generate) => generate(),
        }
    }
}

/// A field declaration: a [`FieldKind`] plus its options.
#[derive(Debug, Clone)]
pub struct Field {
    kind: FieldKind,
    required: bool,
    allow_null: bool,
    load_default: Option<LoadDefault>,
    data_key: Option<String>,
    load_only: bool,
    dump_only: bool,
    validators: Vec<Validator>,
}

impl Field {
    /// Create a field of the given kind with default options.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            required: false,
            allow_null: false,
            load_default: None,
            data_key: None,
            load_only: false,
            dump_only: false,
            validators: Vec::new(),
        }
    }

    /// Field accepting any primitive value.
    pub fn scalar() -> Self {
        Self::new(FieldKind::Scalar(ScalarField))
    }

    /// Mapping whose values must all be primitives (fail-fast).
    pub fn flat_mapping() -> Self {
        Self::new(FieldKind::FlatMapping(FlatMappingField))
    }

    /// Mapping with optional key and value sub-fields (aggregating).
    pub fn nested_mapping(keys: Option<Field>, values: Option<Field>) -> Self {
        Self::new(FieldKind::NestedMapping(NestedMappingField::new(keys, values)))
    }

    /// Mapping accepted as-is, without validating its content.
    pub fn mapping() -> Self {
        Self::new(FieldKind::NestedMapping(NestedMappingField::passthrough()))
    }

    pub fn string() -> Self {
        Self::new(FieldKind::String(StringField))
    }

    pub fn integer() -> Self {
        Self::new(FieldKind::Integer(IntegerField))
    }

    pub fn float() -> Self {
        Self::new(FieldKind::Float(FloatField))
    }

    pub fn boolean() -> Self {
        Self::new(FieldKind::Boolean(BooleanField))
    }

    /// Sequence whose items are validated by `items`.
    pub fn list(items: Field) -> Self {
        Self::new(FieldKind::List(ListField::new(items)))
    }

    /// Field backed by a host-defined codec.
    pub fn custom(codec: impl FieldCodec + 'static) -> Self {
        Self::new(FieldKind::Custom(Arc::new(codec)))
    }

    /// Mark the field as required when loading a schema.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept an explicit null without consulting the field kind.
    pub fn allow_null(mut self) -> Self {
        self.allow_null = true;
        self
    }

    /// Value to use when the field is absent from the input.
    pub fn load_default(mut self, value: Value) -> Self {
        self.load_default = Some(LoadDefault::Value(value));
        self
    }

    /// Generator to call when the field is absent from the input.
    pub fn load_default_with(mut self, generate: fn() -> Value) -> Self {
        self.load_default = Some(LoadDefault::Generated(generate));
        self
    }

    /// Raw-side key, when it differs from the attribute name.
    pub fn data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = Some(key.into());
        self
    }

    /// Only read the field on load; never emit it on dump.
    pub fn load_only(mut self) -> Self {
        self.load_only = true;
        self
    }

    /// Only emit the field on dump; ignore it on load.
    pub fn dump_only(mut self) -> Self {
        self.dump_only = true;
        self
    }

    /// Attach a validator, run after a successful deserialize.
    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    pub fn default_value(&self) -> Option<&LoadDefault> {
        self.load_default.as_ref()
    }

    pub fn raw_key(&self) -> Option<&str> {
        self.data_key.as_deref()
    }

    pub fn is_load_only(&self) -> bool {
        self.load_only
    }

    pub fn is_dump_only(&self) -> bool {
        self.dump_only
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }
}

impl FieldCodec for Field {
    fn serialize(&self, value: &Value) -> ValidationResult<Value> {
        if value.is_null() && self.allow_null {
            return Ok(Value::Null);
        }
        self.kind.codec().serialize(value)
    }

    fn deserialize(&self, raw: &Value) -> ValidationResult<Value> {
        if raw.is_null() {
            if self.allow_null {
                return Ok(Value::Null);
            }
            if !self.kind.accepts_null() {
                return Err(ValidationError::NullNotAllowed);
            }
        }

        let value = self.kind.codec().deserialize(raw)?;
        for validator in &self.validators {
            validator.check(&value)?;
        }
        Ok(value)
    }
}

impl From<FieldKind> for Field {
    fn from(kind: FieldKind) -> Self {
        Self::new(kind)
    }
}
