//! # Domain Types
//!
//! Core domain types used throughout Tally.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchaseOrder   │   │    LineItem     │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  items          │──►│  id             │   │  subtotal       │       │
//! │  │  discount       │   │  price          │   │  applied_disc.  │       │
//! │  └─────────────────┘   │  category       │   │  item_taxes     │       │
//! │                        └─────────────────┘   │  total_taxes    │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  final_total    │       │
//! │  │      Rate       │   │ ProductCategory │   └─────────────────┘       │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  2000 bps = 20% │   │  food_item, car │                              │
//! │  └─────────────────┘   │  Other(String)  │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A fraction applied to an amount (discount or tax).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. Every built-in rate is a whole number
/// of basis points: 1000 bps = 10% student discount, 2000 bps = 20% VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rate(Decimal);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a rate from an exact fraction (0.1 = 10%).
    #[inline]
    pub const fn from_decimal(fraction: Decimal) -> Self {
        Rate(fraction)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(Decimal::ZERO)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Rate)
    }
}

// =============================================================================
// Item Identifier
// =============================================================================

/// Line item identifier, echoed back verbatim in the invoice.
///
/// Orders in the wild use both `"id": 1` and `"id": "A-1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Text(s.to_string())
    }
}

// =============================================================================
// Product Category
// =============================================================================

/// Product category as it appears in `product_category`.
///
/// The set of categories with special tax treatment is closed; anything else
/// is kept verbatim in [`ProductCategory::Other`] and owes no special tax.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    FoodItem,
    Cellphone,
    Computer,
    Car,
    ImportedCar,
    Other(String),
}

impl ProductCategory {
    /// The wire name of the category.
    pub fn as_str(&self) -> &str {
        match self {
            ProductCategory::FoodItem => "food_item",
            ProductCategory::Cellphone => "cellphone",
            ProductCategory::Computer => "computer",
            ProductCategory::Car => "car",
            ProductCategory::ImportedCar => "imported_car",
            ProductCategory::Other(name) => name,
        }
    }

    /// Whether this is one of the known categories.
    pub fn is_known(&self) -> bool {
        !matches!(self, ProductCategory::Other(_))
    }
}

impl From<&str> for ProductCategory {
    fn from(name: &str) -> Self {
        match name {
            "food_item" => ProductCategory::FoodItem,
            "cellphone" => ProductCategory::Cellphone,
            "computer" => ProductCategory::Computer,
            "car" => ProductCategory::Car,
            "imported_car" => ProductCategory::ImportedCar,
            other => ProductCategory::Other(other.to_string()),
        }
    }
}

impl From<String> for ProductCategory {
    fn from(name: String) -> Self {
        ProductCategory::from(name.as_str())
    }
}

impl From<ProductCategory> for String {
    fn from(category: ProductCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    /// Gross price before discount. Never negative once validated.
    pub price: Money,
    pub product_category: ProductCategory,
}

impl LineItem {
    pub fn new(
        id: impl Into<ItemId>,
        price: Money,
        product_category: impl Into<ProductCategory>,
    ) -> Self {
        LineItem {
            id: id.into(),
            price,
            product_category: product_category.into(),
        }
    }
}

// =============================================================================
// Purchase Order
// =============================================================================

/// A list of line items plus an optional discount code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub discount: Option<String>,
}

impl PurchaseOrder {
    pub fn new(items: Vec<LineItem>, discount: Option<&str>) -> Self {
        PurchaseOrder {
            items,
            discount: discount.map(str::to_string),
        }
    }

    /// Checks the invariants serde cannot express.
    ///
    /// Typed orders can be built directly in code, so the calculator runs
    /// this before any aggregation.
    pub fn validate(&self) -> ValidationResult<()> {
        match self.items.iter().position(|item| item.price.is_negative()) {
            Some(index) => Err(ValidationError::NegativePrice { index }),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Tax owed by one line item, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTax {
    pub id: ItemId,
    pub tax: Money,
}

/// The calculator's output. Every amount is rounded to 2 places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub subtotal: Money,
    pub applied_discount: Money,
    pub item_taxes: Vec<ItemTax>,
    pub total_taxes: Money,
    pub final_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(2000);
        assert_eq!(rate.as_decimal(), Decimal::new(2, 1));
        assert_eq!(rate.to_string(), "20%");
        assert!(Rate::zero().is_zero());
    }

    #[test]
    fn test_category_round_trips_unknown_names() {
        let category: ProductCategory = serde_json::from_value(json!("toy")).unwrap();
        assert_eq!(category, ProductCategory::Other("toy".to_string()));
        assert!(!category.is_known());
        assert_eq!(serde_json::to_value(&category).unwrap(), json!("toy"));
    }

    #[test]
    fn test_category_known_names() {
        assert_eq!(ProductCategory::from("imported_car"), ProductCategory::ImportedCar);
        assert_eq!(ProductCategory::FoodItem.as_str(), "food_item");
        assert!(ProductCategory::Car.is_known());
    }

    #[test]
    fn test_item_id_accepts_numbers_and_strings() {
        let numeric: ItemId = serde_json::from_value(json!(7)).unwrap();
        let text: ItemId = serde_json::from_value(json!("A-7")).unwrap();
        assert_eq!(numeric, ItemId::Number(7));
        assert_eq!(text, ItemId::Text("A-7".to_string()));
    }

    #[test]
    fn test_purchase_order_validate_rejects_negative_price() {
        let order = PurchaseOrder::new(
            vec![
                LineItem::new(1_i64, Money::from_cents(100), "car"),
                LineItem::new(2_i64, Money::from_cents(-1), "car"),
            ],
            None,
        );
        assert_eq!(
            order.validate(),
            Err(ValidationError::NegativePrice { index: 1 })
        );
    }

    #[test]
    fn test_invoice_serializes_expected_fields() {
        let invoice = Invoice {
            subtotal: Money::from_cents(10000),
            applied_discount: Money::zero(),
            item_taxes: vec![ItemTax {
                id: ItemId::Number(1),
                tax: Money::zero(),
            }],
            total_taxes: Money::zero(),
            final_total: Money::from_cents(10000),
        };

        let value = serde_json::to_value(&invoice).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["applied_discount", "final_total", "item_taxes", "subtotal", "total_taxes"]
        );
        assert_eq!(value["item_taxes"], json!([{ "id": 1, "tax": 0.0 }]));
    }
}
