//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Serialization
//! This is what a client receives when a request fails:
//! ```json
//! {
//!   "code": "NOT_FOUND",
//!   "message": "Document not found: compra_9.json"
//! }
//! ```
//!
//! ## Status Mapping
//! ```text
//! VALIDATION_ERROR  → 400     NOT_FOUND → 404
//! INVALID_NAME      → 400     STORAGE_ERROR, INTERNAL → 500
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tally_core::ValidationError;
use tally_store::{DocumentError, StoreError};

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested document does not exist (404)
    NotFound,

    /// Purchase order failed validation (400)
    ValidationError,

    /// Document name is not a plain file name (400)
    InvalidName,

    /// Filesystem operation failed (500)
    StorageError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::InvalidName => StatusCode::BAD_REQUEST,
            ErrorCode::StorageError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            StoreError::InvalidName { .. } => {
                ApiError::new(ErrorCode::InvalidName, err.to_string())
            }
            StoreError::Io { .. } => {
                // Log the actual error but return a generic message
                tracing::error!(error = %err, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::RootNotDirectory { .. } => {
                tracing::error!(error = %err, "Storage root is unusable");
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            StoreError::Serialization { .. } => {
                tracing::error!(error = %err, "Document serialization failed");
                ApiError::internal("Document serialization failed")
            }
        }
    }
}

/// Converts validation errors to API errors.
impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts document errors to API errors.
impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Store(e) => e.into(),
            DocumentError::Malformed { .. } | DocumentError::Invalid { .. } => {
                ApiError::validation(err.to_string())
            }
        }
    }
}

/// Converts request body rejections to API errors.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
