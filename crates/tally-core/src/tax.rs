//! # Tax Policy
//!
//! Per-item tax as the sum of independent rules.
//!
//! ## Rule Evaluation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  basis = 70.00, category = cellphone                                    │
//! │       │                                                                 │
//! │       ├──► ValueAddedTax  (20%, food_item exempt) ──► 14.00             │
//! │       │                                                                 │
//! │       ├──► ImportDuty     (30%, cellphone/computer/imported_car) ► 21.00│
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tax = 35.00   (every rule runs; nothing short-circuits)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Category       | VAT | Duty | Total |
//! |----------------|-----|------|-------|
//! | `food_item`    | 0   | 0    | 0%    |
//! | `car`          | 20% | 0    | 20%   |
//! | `cellphone`    | 20% | 30%  | 50%   |
//! | `computer`     | 20% | 30%  | 50%   |
//! | `imported_car` | 20% | 30%  | 50%   |
//! | anything else  | 20% | 0    | 20%   |

use std::fmt;

use crate::money::Money;
use crate::types::{ProductCategory, Rate};

// =============================================================================
// Tax Rule Trait
// =============================================================================

/// One independently pluggable tax.
///
/// A rule sees a single `(basis, category)` pair and returns what it alone
/// contributes; returning zero means "does not apply".
pub trait TaxRule: Send + Sync {
    /// Short label used in tax breakdowns.
    fn name(&self) -> &'static str;

    /// Tax this rule levies on `basis` for an item of `category`.
    fn tax_for(&self, basis: Money, category: &ProductCategory) -> Money;

    /// Overflow-aware [`TaxRule::tax_for`].
    ///
    /// The default only covers rules whose tax never exceeds their basis;
    /// rules with rates above 100% should override it.
    fn checked_tax_for(&self, basis: Money, category: &ProductCategory) -> Option<Money> {
        Some(self.tax_for(basis, category))
    }
}

// =============================================================================
// Built-in Rules
// =============================================================================

/// Value-added tax on every category except the exempt ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueAddedTax {
    pub rate: Rate,
    pub exempt: Vec<ProductCategory>,
}

impl ValueAddedTax {
    /// 20% VAT, food exempt.
    pub fn standard() -> Self {
        ValueAddedTax {
            rate: Rate::from_bps(2000),
            exempt: vec![ProductCategory::FoodItem],
        }
    }
}

impl TaxRule for ValueAddedTax {
    fn name(&self) -> &'static str {
        "vat"
    }

    fn tax_for(&self, basis: Money, category: &ProductCategory) -> Money {
        if self.exempt.contains(category) {
            return Money::zero();
        }
        basis.apply_rate(self.rate)
    }

    fn checked_tax_for(&self, basis: Money, category: &ProductCategory) -> Option<Money> {
        if self.exempt.contains(category) {
            return Some(Money::zero());
        }
        basis.checked_apply_rate(self.rate)
    }
}

/// Import duty levied only on the listed categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDuty {
    pub rate: Rate,
    pub dutiable: Vec<ProductCategory>,
}

impl ImportDuty {
    /// 30% duty on imported cars, cellphones and computers.
    pub fn standard() -> Self {
        ImportDuty {
            rate: Rate::from_bps(3000),
            dutiable: vec![
                ProductCategory::ImportedCar,
                ProductCategory::Cellphone,
                ProductCategory::Computer,
            ],
        }
    }
}

impl TaxRule for ImportDuty {
    fn name(&self) -> &'static str {
        "import_duty"
    }

    fn tax_for(&self, basis: Money, category: &ProductCategory) -> Money {
        if self.dutiable.contains(category) {
            basis.apply_rate(self.rate)
        } else {
            Money::zero()
        }
    }

    fn checked_tax_for(&self, basis: Money, category: &ProductCategory) -> Option<Money> {
        if self.dutiable.contains(category) {
            basis.checked_apply_rate(self.rate)
        } else {
            Some(Money::zero())
        }
    }
}

// =============================================================================
// Tax Policy
// =============================================================================

/// An ordered list of tax rules whose results are added together.
pub struct TaxPolicy {
    rules: Vec<Box<dyn TaxRule>>,
}

impl TaxPolicy {
    /// A policy that taxes nothing.
    pub fn empty() -> Self {
        TaxPolicy { rules: Vec::new() }
    }

    /// VAT followed by import duty.
    pub fn standard() -> Self {
        TaxPolicy::empty()
            .with_rule(ValueAddedTax::standard())
            .with_rule(ImportDuty::standard())
    }

    /// Appends a rule. Existing rules are untouched.
    pub fn with_rule(mut self, rule: impl TaxRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Total tax for one item: the sum over every rule.
    pub fn tax_for(&self, basis: Money, category: &ProductCategory) -> Money {
        self.rules
            .iter()
            .map(|rule| rule.tax_for(basis, category))
            .sum()
    }

    /// Like [`TaxPolicy::tax_for`], but `None` when a rule's result or the
    /// sum leaves the decimal range.
    pub fn checked_tax_for(&self, basis: Money, category: &ProductCategory) -> Option<Money> {
        self.rules.iter().try_fold(Money::zero(), |total, rule| {
            total.checked_add(rule.checked_tax_for(basis, category)?)
        })
    }

    /// Each rule's contribution, in rule order.
    pub fn breakdown_for(
        &self,
        basis: Money,
        category: &ProductCategory,
    ) -> Vec<(&'static str, Money)> {
        self.rules
            .iter()
            .map(|rule| (rule.name(), rule.tax_for(basis, category)))
            .collect()
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for TaxPolicy {
    fn default() -> Self {
        TaxPolicy::standard()
    }
}

impl fmt::Debug for TaxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaxPolicy")
            .field("rules", &self.rule_names())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hundred() -> Money {
        Money::from_cents(10000)
    }

    #[test]
    fn test_vat_applies_to_everything_but_food() {
        let vat = ValueAddedTax::standard();
        assert!(vat.tax_for(hundred(), &ProductCategory::FoodItem).is_zero());
        assert_eq!(vat.tax_for(hundred(), &ProductCategory::Car), Money::from_cents(2000));
        assert_eq!(
            vat.tax_for(hundred(), &ProductCategory::Other("toy".to_string())),
            Money::from_cents(2000)
        );
    }

    #[test]
    fn test_import_duty_only_on_dutiable_categories() {
        let duty = ImportDuty::standard();
        for category in [
            ProductCategory::ImportedCar,
            ProductCategory::Cellphone,
            ProductCategory::Computer,
        ] {
            assert_eq!(duty.tax_for(hundred(), &category), Money::from_cents(3000));
        }
        assert!(duty.tax_for(hundred(), &ProductCategory::Car).is_zero());
        assert!(duty.tax_for(hundred(), &ProductCategory::FoodItem).is_zero());
    }

    #[test]
    fn test_standard_policy_sums_rules() {
        let policy = TaxPolicy::standard();
        assert!(policy.tax_for(hundred(), &ProductCategory::FoodItem).is_zero());
        assert_eq!(policy.tax_for(hundred(), &ProductCategory::Car), Money::from_cents(2000));
        assert_eq!(
            policy.tax_for(Money::from_cents(7000), &ProductCategory::Cellphone),
            Money::from_cents(3500)
        );
    }

    #[test]
    fn test_breakdown_lists_every_rule() {
        let policy = TaxPolicy::standard();
        let breakdown = policy.breakdown_for(hundred(), &ProductCategory::Computer);
        assert_eq!(
            breakdown,
            vec![
                ("vat", Money::from_cents(2000)),
                ("import_duty", Money::from_cents(3000)),
            ]
        );
    }

    struct LuxurySurcharge;

    impl TaxRule for LuxurySurcharge {
        fn name(&self) -> &'static str {
            "luxury"
        }

        fn tax_for(&self, basis: Money, category: &ProductCategory) -> Money {
            match category {
                ProductCategory::Car | ProductCategory::ImportedCar => {
                    basis.apply_rate(Rate::from_bps(1000))
                }
                _ => Money::zero(),
            }
        }
    }

    #[test]
    fn test_custom_rules_extend_the_policy() {
        let policy = TaxPolicy::standard().with_rule(LuxurySurcharge);
        assert_eq!(policy.rule_names(), ["vat", "import_duty", "luxury"]);
        assert_eq!(
            policy.tax_for(hundred(), &ProductCategory::ImportedCar),
            Money::from_cents(6000)
        );
    }

    #[test]
    fn test_checked_tax_for_reports_overflow() {
        let policy = TaxPolicy::empty().with_rule(ValueAddedTax {
            rate: Rate::from_bps(30000),
            exempt: vec![],
        });
        let max = Money::from_decimal(rust_decimal::Decimal::MAX);

        assert_eq!(policy.checked_tax_for(max, &ProductCategory::Car), None);
        assert_eq!(
            TaxPolicy::standard().checked_tax_for(hundred(), &ProductCategory::Computer),
            Some(Money::from_cents(5000))
        );
    }

    #[test]
    fn test_empty_policy_taxes_nothing() {
        assert!(TaxPolicy::empty()
            .tax_for(hundred(), &ProductCategory::Computer)
            .is_zero());
    }
}
