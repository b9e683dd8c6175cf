//! # tally-core: Pure Invoice Logic for Tally
//!
//! This crate is the **heart** of Tally. It turns a purchase order into an
//! invoice using pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tally Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              tally-api (HTTP)  /  tally-invoice (CLI)           │   │
//! │  │    GET /files, POST /files, POST /invoices, ...                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ validation│  │ discount  │  │    tax    │  │  invoice  │  │   │
//! │  │   │ JSON →    │  │ code →    │  │ VAT, Duty │  │ subtotal  │  │   │
//! │  │   │ Order     │  │ Rate      │  │ (summed)  │  │ → Invoice │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-store (flat files)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, PurchaseOrder, Invoice, Rate, ...)
//! - [`money`] - Money type backed by an exact decimal
//! - [`error`] - Validation error type
//! - [`validation`] - Untyped JSON → `PurchaseOrder`
//! - [`discount`] - Discount code table
//! - [`tax`] - Additive tax rules
//! - [`invoice`] - The orchestrator
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same order in, same invoice out
//! 2. **No I/O**: storage and HTTP live in other crates
//! 3. **Decimal Money**: no binary floats anywhere in the arithmetic
//! 4. **Round Once**: values are rounded to 2 places only at the output boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use serde_json::json;
//! use tally_core::invoice_from_json;
//!
//! let order = json!({
//!     "items": [{ "id": 1, "price": 100, "product_category": "computer" }],
//!     "discount": "student"
//! });
//!
//! let invoice = invoice_from_json(&order).unwrap();
//! assert_eq!(invoice.final_total.to_string(), "135.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod error;
pub mod invoice;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::DiscountPolicy;
pub use error::{ValidationError, ValidationResult};
pub use invoice::{compute_invoice, invoice_from_json, InvoiceBreakdown, InvoiceCalculator};
pub use money::Money;
pub use tax::{ImportDuty, TaxPolicy, TaxRule, ValueAddedTax};
pub use types::*;
pub use validation::parse_purchase_order;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of fractional digits every reported amount is rounded to.
pub const REPORTED_DECIMAL_PLACES: u32 = 2;
