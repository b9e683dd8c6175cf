//! Invoice routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tally_core::{Invoice, Rate};
use tally_store::invoice_document;
use tracing::info;

use crate::error::ApiError;
use crate::extractors::extract_json;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DiscountCode {
    pub code: String,
    pub rate: Rate,
}

/// `POST /invoices`: invoice the purchase order in the body.
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Invoice>, ApiError> {
    let document = extract_json(body)?;
    let invoice = state.calculator.compute_json(&document)?;
    info!(
        items = invoice.item_taxes.len(),
        final_total = %invoice.final_total,
        "Invoice computed"
    );
    Ok(Json(invoice))
}

/// `POST /files/{name}/invoice`: invoice a stored purchase order.
pub async fn invoice_stored_order(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<Invoice>, ApiError> {
    let invoice = invoice_document(&state.store, &state.calculator, &name, None).await?;
    Ok(Json(invoice))
}

/// `GET /discounts`: the discount table, in lookup order.
pub async fn list_discounts(State(state): State<Arc<AppState>>) -> Json<Vec<DiscountCode>> {
    let codes = state
        .calculator
        .discounts()
        .codes()
        .map(|(code, rate)| DiscountCode {
            code: code.to_string(),
            rate,
        })
        .collect();
    Json(codes)
}
