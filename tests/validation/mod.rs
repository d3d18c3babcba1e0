//! Validation tests, grouped by component.

pub mod lookups;
pub mod mappings;
pub mod schema;
