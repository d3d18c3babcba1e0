//! Schemas: ordered, named collections of fields.
//!
//! A [`Schema`] loads raw mappings into [`Record`]s and dumps records back
//! into raw mappings. Loading validates every declared field, aggregates all
//! field failures into one error tree keyed by field name, and (by default)
//! copies undeclared input keys through unchanged.
//!
//! # Examples
//!
//! ```rust
//! use stream_schema::field::Field;
//! use stream_schema::schema::Schema;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Schema::builder("UserState")
//!     .field("user", Field::string().required())
//!     .field("user_state", Field::flat_mapping().load_default(json!({})))
//!     .build()?;
//!
//! let record = schema.load(&json!({"user": "alice", "client": "web"}))?;
//! assert_eq!(record.get("user_state"), Some(&json!({})));
//! assert_eq!(record.get("client"), Some(&json!("web")));
//!
//! let err = schema.load(&json!({"user_state": {"a": [1]}})).unwrap_err();
//! assert!(err.messages().get("user").is_some());
//! assert!(err.messages().get("user_state").is_some());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod types;
pub mod validation;


pub use builder::SchemaBuilder;
pub use types::{Record, Schema, SchemaConfig, UnknownFields};
