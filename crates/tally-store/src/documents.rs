//! # Purchase Order Documents
//!
//! Glue between stored JSON documents and the invoice calculator.
//!
//! ```text
//! FileStore::read(name) ──► serde_json ──► parse_purchase_order ──► PurchaseOrder
//!                                                                        │
//!                               InvoiceCalculator::compute ◄─────────────┘
//!                                        │
//!                                        ▼
//!                       Invoice ──► FileStore::write_json(output)   (optional)
//! ```

use serde_json::Value;
use tally_core::{parse_purchase_order, Invoice, InvoiceCalculator, PurchaseOrder};
use tracing::info;

use crate::error::{DocumentError, DocumentResult};
use crate::store::FileStore;

/// Reads, parses and validates a stored purchase order.
pub async fn load_order(store: &FileStore, name: &str) -> DocumentResult<PurchaseOrder> {
    let content = store.read(name).await?;

    let document: Value =
        serde_json::from_str(&content).map_err(|source| DocumentError::Malformed {
            name: name.to_string(),
            source,
        })?;

    parse_purchase_order(&document).map_err(|source| DocumentError::Invalid {
        name: name.to_string(),
        source,
    })
}

/// Computes the invoice of a stored order, storing it under `output` when
/// given.
pub async fn invoice_document(
    store: &FileStore,
    calculator: &InvoiceCalculator,
    order_name: &str,
    output: Option<&str>,
) -> DocumentResult<Invoice> {
    let order = load_order(store, order_name).await?;

    let invoice = calculator
        .compute(&order)
        .map_err(|source| DocumentError::Invalid {
            name: order_name.to_string(),
            source,
        })?;

    info!(
        order = order_name,
        items = order.items.len(),
        final_total = %invoice.final_total,
        "Invoice computed"
    );

    if let Some(output) = output {
        store.write_json(output, &invoice).await?;
    }

    Ok(invoice)
}
