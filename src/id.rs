//! Opaque identifier generation.

use uuid::Uuid;

/// Length of a generated identifier.
pub const ID_LENGTH: usize = 32;

/// Generate a random 128-bit identifier as 32 lowercase hex characters.
///
/// Suitable for session and connection ids. Uniqueness is probabilistic;
/// callers do not need to check against existing ids.
///
/// ```rust
/// let id = stream_schema::id::generate_id();
/// assert_eq!(id.len(), 32);
/// assert!(stream_schema::id::is_id(&id));
/// ```
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Whether `value` has the shape of a generated identifier.
pub fn is_id(value: &str) -> bool {
    value.len() == ID_LENGTH
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
