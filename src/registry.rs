//! Read-only existence lookups against host-owned registries.
//!
//! The validation core never owns, locks or caches the host's connection
//! and user tables; it only asks whether an identifier is present. A
//! positive answer is advisory: the host may remove the entry right after
//! the check.
//!
//! # Example Usage
//!
//! ```rust
//! use stream_schema::registry::{InMemoryRegistry, Registry};
//!
//! let connections = InMemoryRegistry::with_entries(["abc123"]);
//! assert!(connections.exists("abc123"));
//!
//! connections.remove("abc123");
//! assert!(!connections.exists("abc123"));
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

/// Existence check over a host-owned table.
pub trait Registry: Send + Sync {
    /// Whether `identifier` is currently present.
    fn exists(&self, identifier: &str) -> bool;
}

impl Registry for HashSet<String> {
    fn exists(&self, identifier: &str) -> bool {
        self.contains(identifier)
    }
}

impl Registry for BTreeSet<String> {
    fn exists(&self, identifier: &str) -> bool {
        self.contains(identifier)
    }
}

/// Thread-safe in-memory registry.
///
/// Clones share the same table, so a host can keep one handle for
/// mutation and hand another to validators.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    entries: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with `entries`.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: Arc::new(RwLock::new(entries.into_iter().map(Into::into).collect())),
        }
    }

    /// Add an identifier. Returns false if it was already present.
    pub fn insert(&self, identifier: impl Into<String>) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(identifier.into())
    }

    /// Remove an identifier. Returns true if it was present.
    pub fn remove(&self, identifier: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all entries (useful for testing).
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Registry for InMemoryRegistry {
    fn exists(&self, identifier: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(identifier)
    }
}
