//! # Store Error Types
//!
//! Error types for record store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Blob I/O error (std::io::Error) / JSON error (serde_json::Error)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the collection key and categorization │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller surfaces it as a fatal error                                   │
//! │                                                                         │
//! │  There is no retry policy: a persistence failure propagates            │
//! │  unchanged rather than being swallowed or compensated.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use dukaan_core::CoreError;

/// Record store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in its collection.
    ///
    /// ## When This Occurs
    /// - Updating or deleting an id that was already removed
    /// - Committing a sale against a customer id that no longer exists
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    /// Reading a collection blob failed at the I/O layer.
    #[error("Failed to load collection '{key}': {source}")]
    Load {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// Writing a collection blob failed at the I/O layer.
    ///
    /// The in-memory collection may already hold the mutation; callers
    /// treat this as fatal rather than retrying.
    #[error("Failed to persist collection '{key}': {source}")]
    Persist {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A stored collection blob is not valid JSON for its record type.
    #[error("Corrupt collection '{key}': {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Serializing a collection for persistence failed.
    #[error("Failed to encode collection '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Business rule violation (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: u64) -> Self {
        StoreError::NotFound { entity, id }
    }
}

/// Result type for record store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
