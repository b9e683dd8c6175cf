//! # Validation Module
//!
//! Turns an untyped JSON purchase order into a [`PurchaseOrder`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Transport (HTTP body / file on disk)                         │
//! │  └── Must be well-formed JSON                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Shape checks (object, items is a list, required fields)           │
//! │  ├── Type checks (id, price, product_category)                         │
//! │  └── Domain checks (price >= 0)                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: InvoiceCalculator                                            │
//! │  └── Only ever sees a valid PurchaseOrder                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation fails fast: the first problem found is returned, naming the
//! field and, for item problems, the zero-based item index.
//!
//! ## Usage
//! ```rust
//! use serde_json::json;
//! use tally_core::validation::parse_purchase_order;
//! use tally_core::ValidationError;
//!
//! let err = parse_purchase_order(&json!({ "items": [{ "id": 1, "price": 5 }] }))
//!     .unwrap_err();
//! assert_eq!(err, ValidationError::missing_item_field(0, "product_category"));
//! ```

use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::str::FromStr;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{ItemId, LineItem, ProductCategory, PurchaseOrder};

// =============================================================================
// Order Validators
// =============================================================================

/// Validates a JSON document and builds the purchase order it describes.
///
/// ## Rules
/// - Document must be an object
/// - `items` is required and must be an array (may be empty)
/// - `discount` may be absent, null or a string
/// - Each item must carry `id`, `price`, `product_category` (see
///   [`parse_line_item`])
pub fn parse_purchase_order(document: &Value) -> ValidationResult<PurchaseOrder> {
    let order = document
        .as_object()
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "order".to_string(),
            reason: "must be a JSON object".to_string(),
        })?;

    let raw_items = match order.get("items") {
        None => {
            return Err(ValidationError::Required {
                field: "items".to_string(),
            })
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::NotASequence {
                field: "items".to_string(),
            })
        }
    };

    let discount = parse_discount_code(order.get("discount"))?;

    let items = raw_items
        .iter()
        .enumerate()
        .map(|(index, raw)| parse_line_item(index, raw))
        .collect::<ValidationResult<Vec<_>>>()?;

    Ok(PurchaseOrder { items, discount })
}

/// Validates the optional discount code.
///
/// Absent and `null` both mean "no code". Any string is accepted here;
/// unknown codes are handled by the discount policy, not rejected.
pub fn parse_discount_code(raw: Option<&Value>) -> ValidationResult<Option<String>> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(code)) => Ok(Some(code.clone())),
        Some(_) => Err(ValidationError::InvalidFormat {
            field: "discount".to_string(),
            reason: "must be a string or null".to_string(),
        }),
    }
}

// =============================================================================
// Item Validators
// =============================================================================

/// Validates one element of `items`.
///
/// ## Rules
/// - Must be an object
/// - `id`: integer or string
/// - `price`: JSON number, not negative
/// - `product_category`: string (any value; unknown names are allowed)
///
/// Fields are checked in the order `id`, `price`, `product_category`.
pub fn parse_line_item(index: usize, raw: &Value) -> ValidationResult<LineItem> {
    let item = raw
        .as_object()
        .ok_or(ValidationError::InvalidItem { index })?;

    let id = match required_field(item, index, "id")? {
        Value::Number(n) => n.as_i64().map(ItemId::Number).ok_or_else(|| {
            ValidationError::invalid_item_field(index, "id", "must be an integer or string")
        })?,
        Value::String(s) => ItemId::Text(s.clone()),
        _ => {
            return Err(ValidationError::invalid_item_field(
                index,
                "id",
                "must be an integer or string",
            ))
        }
    };

    let price = match required_field(item, index, "price")? {
        Value::Number(n) => parse_price(index, n)?,
        _ => {
            return Err(ValidationError::invalid_item_field(
                index,
                "price",
                "must be a number",
            ))
        }
    };

    let product_category = match required_field(item, index, "product_category")? {
        Value::String(name) => ProductCategory::from(name.as_str()),
        _ => {
            return Err(ValidationError::invalid_item_field(
                index,
                "product_category",
                "must be a string",
            ))
        }
    };

    Ok(LineItem {
        id,
        price,
        product_category,
    })
}

/// Looks up a field, treating `null` the same as absent.
fn required_field<'a>(
    item: &'a Map<String, Value>,
    index: usize,
    field: &str,
) -> ValidationResult<&'a Value> {
    match item.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing_item_field(index, field)),
        Some(value) => Ok(value),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Converts a JSON number to exact decimal money.
///
/// The number's text form is parsed, so `19.99` becomes exactly 19.99
/// rather than the nearest binary float.
fn parse_price(index: usize, number: &Number) -> ValidationResult<Money> {
    let text = number.to_string();
    let amount = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            ValidationError::invalid_item_field(index, "price", "is out of range")
        })?;

    let price = Money::from_decimal(amount);
    if price.is_negative() {
        return Err(ValidationError::NegativePrice { index });
    }

    Ok(price)
}

// =============================================================================
// Unit Tests
// =============================================================================
