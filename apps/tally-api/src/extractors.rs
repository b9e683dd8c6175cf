//! # Request Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_json`], so a body that is not valid JSON (or lacks the JSON
//! content type) is answered with the usual `{code, message}` envelope
//! instead of axum's plain-text rejection.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::ApiError;

/// Unwraps a JSON body, mapping rejections to `VALIDATION_ERROR`.
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., ApiError> {
///     let request = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value).map_err(ApiError::from)
}
