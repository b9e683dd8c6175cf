//! # Invoice Orchestrator
//!
//! Composes the discount and tax policies into an invoice.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PurchaseOrder                                                          │
//! │       │ validate (fail fast, no partial invoice)                        │
//! │       ▼                                                                 │
//! │  subtotal = Σ price                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  applied_discount = min(subtotal × rate(code), subtotal)               │
//! │  net_total        = max(subtotal − applied_discount, 0)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per item: basis = net_total × price / subtotal   (0 if subtotal = 0)  │
//! │            tax   = Σ rule.tax_for(basis, category)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  total_taxes = Σ tax (UNROUNDED)                                        │
//! │  final_total = net_total + total_taxes                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Invoice (every field rounded to 2 places HERE, and only here)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Prorate the Discount?
//! Taxing the gross price would tax value the customer never paid for.
//! Spreading `net_total` over items in proportion to their price taxes
//! exactly what was charged.

use serde::Serialize;
use serde_json::Value;

use crate::discount::DiscountPolicy;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::tax::TaxPolicy;
use crate::types::{Invoice, ItemId, ItemTax, ProductCategory, PurchaseOrder, Rate};
use crate::validation::parse_purchase_order;

// =============================================================================
// Breakdown
// =============================================================================

/// Tax detail for one line item, unrounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemBreakdown {
    pub id: ItemId,
    pub category: ProductCategory,
    /// Prorated share of the net total the rules were applied to.
    pub basis: Money,
    pub tax: Money,
}

/// Every intermediate value of an invoice calculation, at full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceBreakdown {
    pub subtotal: Money,
    pub rate: Rate,
    pub applied_discount: Money,
    pub net_total: Money,
    pub items: Vec<ItemBreakdown>,
    pub total_taxes: Money,
    pub final_total: Money,
}

impl InvoiceBreakdown {
    /// Rounds every amount to cents. Item order is preserved.
    pub fn to_invoice(&self) -> Invoice {
        Invoice {
            subtotal: self.subtotal.round_to_cents(),
            applied_discount: self.applied_discount.round_to_cents(),
            item_taxes: self
                .items
                .iter()
                .map(|item| ItemTax {
                    id: item.id.clone(),
                    tax: item.tax.round_to_cents(),
                })
                .collect(),
            total_taxes: self.total_taxes.round_to_cents(),
            final_total: self.final_total.round_to_cents(),
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// A discount policy and a tax policy, applied to purchase orders.
///
/// Holds no per-call state, so one calculator can serve any number of
/// concurrent callers.
#[derive(Debug, Default)]
pub struct InvoiceCalculator {
    discounts: DiscountPolicy,
    taxes: TaxPolicy,
}

impl InvoiceCalculator {
    pub fn new(discounts: DiscountPolicy, taxes: TaxPolicy) -> Self {
        InvoiceCalculator { discounts, taxes }
    }

    /// Built-in discount codes, VAT and import duty.
    pub fn standard() -> Self {
        InvoiceCalculator::new(DiscountPolicy::standard(), TaxPolicy::standard())
    }

    pub fn discounts(&self) -> &DiscountPolicy {
        &self.discounts
    }

    pub fn taxes(&self) -> &TaxPolicy {
        &self.taxes
    }

    /// Runs the full calculation without rounding anything.
    pub fn breakdown(&self, order: &PurchaseOrder) -> ValidationResult<InvoiceBreakdown> {
        order.validate()?;

        let subtotal = Money::checked_sum(order.items.iter().map(|item| item.price))
            .ok_or_else(|| ValidationError::out_of_range("subtotal"))?;
        let rate = self.discounts.rate_for(order.discount.as_deref());
        let applied_discount = self.discounts.amount_for(order.discount.as_deref(), subtotal);
        let net_total = subtotal
            .checked_sub(applied_discount)
            .ok_or_else(|| ValidationError::out_of_range("net_total"))?
            .non_negative();

        let items = order
            .items
            .iter()
            .map(|item| {
                let basis = net_total.prorate(item.price, subtotal);
                let tax = self
                    .taxes
                    .checked_tax_for(basis, &item.product_category)
                    .ok_or_else(|| ValidationError::out_of_range("tax"))?;
                Ok(ItemBreakdown {
                    id: item.id.clone(),
                    category: item.product_category.clone(),
                    basis,
                    tax,
                })
            })
            .collect::<ValidationResult<Vec<_>>>()?;

        let total_taxes = Money::checked_sum(items.iter().map(|item| item.tax))
            .ok_or_else(|| ValidationError::out_of_range("total_taxes"))?;
        let final_total = net_total
            .checked_add(total_taxes)
            .ok_or_else(|| ValidationError::out_of_range("final_total"))?;

        Ok(InvoiceBreakdown {
            subtotal,
            rate,
            applied_discount,
            net_total,
            items,
            total_taxes,
            final_total,
        })
    }

    /// Computes the rounded invoice for an order.
    pub fn compute(&self, order: &PurchaseOrder) -> ValidationResult<Invoice> {
        self.breakdown(order).map(|breakdown| breakdown.to_invoice())
    }

    /// Validates a raw JSON order, then computes its invoice.
    pub fn compute_json(&self, document: &Value) -> ValidationResult<Invoice> {
        let order = parse_purchase_order(document)?;
        self.compute(&order)
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Computes an invoice with the standard policies.
pub fn compute_invoice(order: &PurchaseOrder) -> ValidationResult<Invoice> {
    InvoiceCalculator::standard().compute(order)
}

/// Validates a raw JSON order and computes its invoice with the standard
/// policies.
pub fn invoice_from_json(document: &Value) -> ValidationResult<Invoice> {
    InvoiceCalculator::standard().compute_json(document)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn item(id: i64, cents: i64, category: &str) -> LineItem {
        LineItem::new(id, Money::from_cents(cents), category)
    }

    fn within_a_cent(a: Money, b: Money) -> bool {
        let diff = if a > b { a - b } else { b - a };
        diff <= Money::from_cents(1)
    }

    #[test]
    fn test_food_item_without_discount() {
        let order = PurchaseOrder::new(vec![item(1, 10000, "food_item")], None);
        let invoice = compute_invoice(&order).unwrap();

        assert_eq!(invoice.subtotal, Money::from_cents(10000));
        assert!(invoice.applied_discount.is_zero());
        assert_eq!(
            invoice.item_taxes,
            vec![ItemTax {
                id: ItemId::Number(1),
                tax: Money::zero()
            }]
        );
        assert!(invoice.total_taxes.is_zero());
        assert_eq!(invoice.final_total, Money::from_cents(10000));
    }

    #[test]
    fn test_computer_owes_vat_and_duty() {
        let order = PurchaseOrder::new(vec![item(1, 10000, "computer")], None);
        let invoice = compute_invoice(&order).unwrap();

        assert_eq!(invoice.total_taxes, Money::from_cents(5000));
        assert_eq!(invoice.final_total, Money::from_cents(15000));
    }

    #[test]
    fn test_student_discount_reduces_tax_basis() {
        let order = PurchaseOrder::new(vec![item(1, 10000, "computer")], Some("student"));
        let breakdown = InvoiceCalculator::standard().breakdown(&order).unwrap();

        assert_eq!(breakdown.applied_discount, Money::from_cents(1000));
        assert_eq!(breakdown.net_total, Money::from_cents(9000));
        assert_eq!(breakdown.items[0].basis, Money::from_cents(9000));

        let invoice = breakdown.to_invoice();
        assert_eq!(invoice.item_taxes[0].tax, Money::from_cents(4500));
        assert_eq!(invoice.total_taxes, Money::from_cents(4500));
        assert_eq!(invoice.final_total, Money::from_cents(13500));
    }

    #[test]
    fn test_black_friday_prorates_across_items() {
        let order = PurchaseOrder::new(
            vec![item(1, 10000, "food_item"), item(2, 10000, "cellphone")],
            Some("black_friday"),
        );
        let breakdown = InvoiceCalculator::standard().breakdown(&order).unwrap();

        assert_eq!(breakdown.subtotal, Money::from_cents(20000));
        assert_eq!(breakdown.applied_discount, Money::from_cents(6000));
        assert_eq!(breakdown.net_total, Money::from_cents(14000));
        assert!(breakdown
            .items
            .iter()
            .all(|i| i.basis == Money::from_cents(7000)));

        let invoice = breakdown.to_invoice();
        assert!(invoice.item_taxes[0].tax.is_zero());
        assert_eq!(invoice.item_taxes[1].tax, Money::from_cents(3500));
        assert_eq!(invoice.total_taxes, Money::from_cents(3500));
        assert_eq!(invoice.final_total, Money::from_cents(17500));
    }

    #[test]
    fn test_plain_car_owes_only_vat() {
        let order = PurchaseOrder::new(vec![item(1, 10000, "car")], None);
        let invoice = compute_invoice(&order).unwrap();
        assert_eq!(invoice.total_taxes, Money::from_cents(2000));
    }

    #[test]
    fn test_empty_order_is_all_zero() {
        let order = PurchaseOrder::new(vec![], Some("black_friday"));
        let invoice = compute_invoice(&order).unwrap();

        assert!(invoice.subtotal.is_zero());
        assert!(invoice.applied_discount.is_zero());
        assert!(invoice.item_taxes.is_empty());
        assert!(invoice.total_taxes.is_zero());
        assert!(invoice.final_total.is_zero());
    }

    #[test]
    fn test_zero_priced_items_do_not_divide_by_zero() {
        let order = PurchaseOrder::new(
            vec![item(1, 0, "computer"), item(2, 0, "car")],
            Some("student"),
        );
        let breakdown = InvoiceCalculator::standard().breakdown(&order).unwrap();

        assert!(breakdown.items.iter().all(|i| i.basis.is_zero()));
        assert!(breakdown.final_total.is_zero());
    }

    #[test]
    fn test_unknown_code_behaves_like_no_code() {
        let items = vec![item(1, 4999, "computer"), item(2, 1250, "food_item")];
        let none = compute_invoice(&PurchaseOrder::new(items.clone(), None)).unwrap();
        let empty = compute_invoice(&PurchaseOrder::new(items.clone(), Some(""))).unwrap();
        let unknown =
            compute_invoice(&PurchaseOrder::new(items, Some("unknown_code"))).unwrap();

        assert_eq!(none, unknown);
        assert_eq!(none, empty);
        assert!(none.applied_discount.is_zero());
        assert_eq!(none.subtotal, Money::from_cents(6249));
    }

    #[test]
    fn test_item_taxes_preserve_input_order() {
        let order = PurchaseOrder::new(
            vec![item(3, 100, "car"), item(1, 100, "car"), item(2, 100, "car")],
            None,
        );
        let ids: Vec<ItemId> = compute_invoice(&order)
            .unwrap()
            .item_taxes
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![ItemId::Number(3), ItemId::Number(1), ItemId::Number(2)]);
    }

    #[test]
    fn test_totals_accumulate_unrounded_item_taxes() {
        // Each item owes 0.025, which reports as 0.02 (half to even),
        // but the total is 0.05, not 0.02 + 0.02.
        let order = PurchaseOrder::new(
            vec![item(1, 5, "computer"), item(2, 5, "computer")],
            None,
        );
        let breakdown = InvoiceCalculator::standard().breakdown(&order).unwrap();
        assert_eq!(breakdown.items[0].tax.amount(), Decimal::new(25, 3));

        let invoice = breakdown.to_invoice();
        assert_eq!(invoice.item_taxes[0].tax, Money::from_cents(2));
        assert_eq!(invoice.item_taxes[1].tax, Money::from_cents(2));
        assert_eq!(invoice.total_taxes, Money::from_cents(5));
        assert_eq!(invoice.final_total, Money::from_cents(15));
    }

    #[test]
    fn test_balance_and_additivity_identities() {
        let orders = [
            PurchaseOrder::new(vec![item(1, 3333, "cellphone")], Some("student")),
            PurchaseOrder::new(
                vec![item(1, 1999, "imported_car"), item(2, 333, "car")],
                Some("black_friday"),
            ),
            PurchaseOrder::new(
                vec![item(1, 101, "food_item"), item(2, 7, "computer")],
                None,
            ),
        ];

        for order in &orders {
            let breakdown = InvoiceCalculator::standard().breakdown(order).unwrap();
            let invoice = breakdown.to_invoice();

            let reported_sum: Money = invoice.item_taxes.iter().map(|t| t.tax).sum();
            assert!(within_a_cent(reported_sum, invoice.total_taxes));

            assert_eq!(
                breakdown.net_total,
                (breakdown.subtotal - breakdown.applied_discount).non_negative()
            );
            assert_eq!(
                invoice.final_total,
                (breakdown.net_total + breakdown.total_taxes).round_to_cents()
            );
            assert!(within_a_cent(
                invoice.final_total,
                invoice.subtotal - invoice.applied_discount + invoice.total_taxes
            ));
        }
    }

    #[test]
    fn test_discount_never_exceeds_subtotal() {
        let calculator = InvoiceCalculator::new(
            DiscountPolicy::empty().with_code("too_generous", Rate::from_bps(20000)),
            TaxPolicy::standard(),
        );
        let order = PurchaseOrder::new(vec![item(1, 10000, "car")], Some("too_generous"));
        let breakdown = calculator.breakdown(&order).unwrap();

        assert_eq!(breakdown.applied_discount, breakdown.subtotal);
        assert!(breakdown.net_total.is_zero());
        assert!(breakdown.final_total.is_zero());
    }

    #[test]
    fn test_large_prices_compute_without_overflow() {
        let invoice = invoice_from_json(&json!({
            "items": [
                { "id": 1, "price": 1e15, "product_category": "car" },
                { "id": 2, "price": 1e15, "product_category": "car" }
            ]
        }))
        .unwrap();

        let quadrillion = Decimal::from(1_000_000_000_000_000_i64);
        assert_eq!(invoice.subtotal.amount(), quadrillion * Decimal::TWO);
        assert_eq!(invoice.item_taxes[0].tax.amount(), quadrillion / Decimal::from(5));
        assert_eq!(invoice.total_taxes.amount(), quadrillion * Decimal::new(4, 1));
        assert_eq!(invoice.final_total.amount(), quadrillion * Decimal::new(24, 1));
    }

    #[test]
    fn test_amounts_beyond_decimal_range_are_rejected() {
        let max = Money::from_decimal(Decimal::MAX);

        let two_max = PurchaseOrder::new(
            vec![
                LineItem::new(1_i64, max, "food_item"),
                LineItem::new(2_i64, max, "food_item"),
            ],
            None,
        );
        assert_eq!(
            compute_invoice(&two_max),
            Err(ValidationError::out_of_range("subtotal"))
        );

        // Taxes on a maximal price push the final total past the range.
        let one_max = PurchaseOrder::new(vec![LineItem::new(1_i64, max, "computer")], None);
        assert_eq!(
            compute_invoice(&one_max),
            Err(ValidationError::out_of_range("final_total"))
        );
    }

    #[test]
    fn test_negative_price_is_rejected_before_aggregation() {
        let order = PurchaseOrder::new(vec![item(1, 100, "car"), item(2, -100, "car")], None);
        assert_eq!(
            compute_invoice(&order),
            Err(ValidationError::NegativePrice { index: 1 })
        );
    }

    #[test]
    fn test_invoice_from_json() {
        let invoice = invoice_from_json(&json!({
            "items": [
                { "id": 1, "price": 100, "product_category": "food_item" },
                { "id": 2, "price": 100, "product_category": "cellphone" }
            ],
            "discount": "black_friday"
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(&invoice).unwrap(),
            json!({
                "subtotal": 200.0,
                "applied_discount": 60.0,
                "item_taxes": [{ "id": 1, "tax": 0.0 }, { "id": 2, "tax": 35.0 }],
                "total_taxes": 35.0,
                "final_total": 175.0
            })
        );
    }

    #[test]
    fn test_invoice_from_json_reports_missing_field() {
        let err = invoice_from_json(&json!({
            "items": [{ "id": 1, "product_category": "car" }]
        }))
        .unwrap_err();
        assert_eq!(err, ValidationError::missing_item_field(0, "price"));
    }
}
