//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  └── ValidationError  - Malformed purchase orders                      │
//! │                                                                         │
//! │  tally-store errors (separate crate)                                   │
//! │  ├── StoreError       - Missing / unreadable documents                 │
//! │  └── DocumentError    - Store + JSON + validation                      │
//! │                                                                         │
//! │  tally-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → DocumentError → ApiError → Client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Unknown discount codes and unknown product categories are normal input.
//! They degrade to "no discount" and "no special tax" respectively.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Purchase order validation failures.
///
/// Raised before any aggregation runs, so a caller never sees a partial
/// invoice. Item-level variants carry the zero-based item index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required top-level field is missing.
    #[error("{field} is required")]
    Required { field: String },

    /// A top-level field has the wrong JSON type.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A field that must be a list is something else.
    #[error("{field} must be a sequence")]
    NotASequence { field: String },

    /// An element of `items` is not an object.
    #[error("item {index} must be an object")]
    InvalidItem { index: usize },

    /// An item lacks one of `id`, `price`, `product_category`.
    #[error("item {index}: {field} is required")]
    MissingItemField { index: usize, field: String },

    /// An item field has the wrong JSON type.
    #[error("item {index}: {field} has invalid format: {reason}")]
    InvalidItemField {
        index: usize,
        field: String,
        reason: String,
    },

    /// Negative prices are not a valid domain state.
    #[error("item {index}: price must not be negative")]
    NegativePrice { index: usize },

    /// An invoice amount does not fit in the decimal range.
    #[error("{field} is out of range")]
    AmountOutOfRange { field: String },
}

impl ValidationError {
    /// Creates a MissingItemField error.
    pub fn missing_item_field(index: usize, field: impl Into<String>) -> Self {
        ValidationError::MissingItemField {
            index,
            field: field.into(),
        }
    }

    /// Creates an InvalidItemField error.
    pub fn invalid_item_field(
        index: usize,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidItemField {
            index,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an AmountOutOfRange error.
    pub fn out_of_range(field: impl Into<String>) -> Self {
        ValidationError::AmountOutOfRange {
            field: field.into(),
        }
    }

    /// Index of the offending item, when the error is item-level.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            ValidationError::InvalidItem { index }
            | ValidationError::MissingItemField { index, .. }
            | ValidationError::InvalidItemField { index, .. }
            | ValidationError::NegativePrice { index } => Some(*index),
            ValidationError::Required { .. }
            | ValidationError::InvalidFormat { .. }
            | ValidationError::NotASequence { .. }
            | ValidationError::AmountOutOfRange { .. } => None,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
