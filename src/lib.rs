//! Typed validation and serialization of loosely structured JSON payloads.
//!
//! Converts untrusted nested mappings into typed records while collecting a
//! complete tree of structured errors instead of failing on the first
//! problem. Failed loads still hand back the data that did validate.
//!
//! # Core Components
//!
//! - [`Field`] - a unit of validation, built from the closed [`FieldKind`] set
//! - [`Schema`] - an ordered collection of named fields with load/dump
//! - [`ValidationError`] / [`ErrorMessages`] - error tree plus partial data
//! - [`Registry`] - injected read-only existence lookups for validators
//!
//! # Quick Start
//!
//! ```rust
//! use stream_schema::{Field, Schema};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builder("Message")
//!     .field("channel", Field::string().required())
//!     .field("state", Field::nested_mapping(None, Some(Field::scalar())))
//!     .build()?;
//!
//! let err = schema
//!     .load(&json!({"channel": "pub", "state": {"a": 1, "b": [1, 2]}}))
//!     .unwrap_err();
//! assert_eq!(
//!     err.messages().to_json(),
//!     json!({"state": {"b": {"value": [
//!         "Value is not type of string, integer, boolean or float."
//!     ]}}})
//! );
//! assert_eq!(
//!     err.partial_data(),
//!     Some(&json!({"channel": "pub", "state": {"a": 1, "b": null}}))
//! );
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod field;
pub mod id;
pub mod payloads;
pub mod registry;
pub mod schema;
pub mod validators;

// Re-export commonly used types for convenience
pub use error::{
    BuildError, BuildResult, EntityKind, ErrorMessages, ValidationError, ValidationResult,
};
pub use field::{
    Field, FieldCodec, FieldKind, FlatMappingField, NestedMappingField, ScalarField,
};
pub use id::generate_id;
pub use payloads::{Preset, Registries};
pub use registry::{InMemoryRegistry, Registry};
pub use schema::{Record, Schema, SchemaBuilder, SchemaConfig, UnknownFields};
pub use validators::{Validator, validate_connection_exists, validate_user_exists};
