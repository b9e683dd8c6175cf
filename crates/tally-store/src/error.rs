//! # Store Error Types
//!
//! Error types for document store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError, DocumentError (this module) ← Adds the document name      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in tally-api) ← Serialized for HTTP clients                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use tally_core::ValidationError;
use thiserror::Error;

/// File store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No document with this name exists.
    ///
    /// Distinct from every other failure so callers can answer "404"
    /// instead of "500".
    #[error("Document not found: {name}")]
    NotFound { name: String },

    /// The name cannot be used as a single file name.
    ///
    /// ## When This Occurs
    /// - Empty name
    /// - Contains a path separator
    /// - `.` or `..`
    #[error("Invalid document name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The configured store root exists but is not a directory.
    #[error("Store root is not a directory: {root}")]
    RootNotDirectory { root: String },

    /// Filesystem operation failed.
    #[error("I/O error on '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A document could not be (de)serialized as JSON.
    #[error("Serialization error on '{name}': {message}")]
    Serialization { name: String, message: String },
}

impl StoreError {
    /// Creates a NotFound error for a document name.
    pub fn not_found(name: impl Into<String>) -> Self {
        StoreError::NotFound { name: name.into() }
    }

    /// Creates an InvalidName error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Maps an I/O error, turning `ErrorKind::NotFound` into [`StoreError::NotFound`].
    ///
    /// ## Error Mapping
    /// ```text
    /// io::ErrorKind::NotFound → StoreError::NotFound
    /// Other                   → StoreError::Io
    /// ```
    pub fn from_io(name: impl Into<String>, err: io::Error) -> Self {
        let name = name.into();
        if err.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound { name }
        } else {
            StoreError::Io { name, source: err }
        }
    }

    /// Whether this is the "missing document" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from loading and invoicing stored purchase orders.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stored text is not JSON.
    #[error("Document '{name}' is not valid JSON: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON is not a valid purchase order.
    #[error("Document '{name}' is not a valid purchase order: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;
