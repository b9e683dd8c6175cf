//! HTTP route handlers.

pub mod files;
pub mod health;
pub mod invoices;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// Builds the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/files", get(files::list_files).post(files::create_file))
        .route("/files/{name}", get(files::read_file))
        .route("/files/{name}/invoice", post(invoices::invoice_stored_order))
        .route("/invoices", post(invoices::create_invoice))
        .route("/discounts", get(invoices::list_discounts))
        .route("/health", get(health::health))
        .with_state(state)
}
