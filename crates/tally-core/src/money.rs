//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Prorating a discount across items divides amounts:                     │
//! │    140 × (100 / 200) must be exactly 70, every time                     │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals, rounded ONCE                     │
//! │    Intermediate values keep full precision.                             │
//! │    Only the invoice boundary rounds to 2 places.                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::types::Rate;
//!
//! let price = Money::from_cents(10000);         // 100.00
//! let vat = price.apply_rate(Rate::from_bps(2000)); // 20%
//! assert_eq!(vat, Money::from_cents(2000));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use crate::types::Rate;
use crate::REPORTED_DECIMAL_PLACES;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the (single, implicit) invoice currency.
///
/// ## Design Decisions
/// - **Decimal (not f64)**: prorating and rates stay exact
/// - **Unrounded by default**: arithmetic never rounds; call
///   [`Money::round_to_cents`] at the output boundary
/// - **Serialized as a JSON number**: invoices read like the input orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Multiplies by a rate without rounding.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::Rate;
    ///
    /// let basis = Money::from_cents(7000); // 70.00
    /// let duty = basis.apply_rate(Rate::from_bps(3000));
    /// assert_eq!(duty, Money::from_cents(2100));
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: Rate) -> Money {
        Money(self.0 * rate.as_decimal())
    }

    /// Returns `self × part / whole`, the share of `self` that `part`
    /// represents within `whole`.
    ///
    /// A zero `whole` yields zero instead of dividing by zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Net total: 140.00   (after a 30% discount on 200.00)
    /// Item price: 100.00 of 200.00
    ///      │
    ///      ▼
    /// prorate(100.00, 200.00) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax basis: 70.00
    /// ```
    ///
    /// `part` must not exceed `whole`. When `self × part` does not fit in a
    /// `Decimal`, the ratio is taken first, trading the last digits of
    /// precision for range.
    pub fn prorate(&self, part: Money, whole: Money) -> Money {
        if whole.is_zero() {
            return Money::zero();
        }
        match self.0.checked_mul(part.0) {
            Some(product) => Money(product / whole.0),
            None => Money(self.0 * (part.0 / whole.0)),
        }
    }

    /// Adds, returning `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Subtracts, returning `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Multiplies by a rate, returning `None` on overflow.
    #[inline]
    pub fn checked_apply_rate(&self, rate: Rate) -> Option<Money> {
        self.0.checked_mul(rate.as_decimal()).map(Money)
    }

    /// Sums an iterator, returning `None` on overflow.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Money>) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Clamps negative amounts to zero.
    #[inline]
    pub fn non_negative(self) -> Money {
        self.max(Money::zero())
    }

    /// Rounds to 2 decimal places using Bankers Rounding (round half to even).
    ///
    /// ## Bankers Rounding Explained
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Standard rounding always rounds 0.5 UP, causing systematic bias:  │
    /// │    0.125 → 0.13, 0.135 → 0.14                                       │
    /// │                                                                     │
    /// │  Bankers Rounding rounds 0.5 to the nearest EVEN digit:            │
    /// │    0.125 → 0.12, 0.135 → 0.14                                       │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tally_core::money::Money;
    ///
    /// let tax = Money::from_decimal(Decimal::new(25, 3)); // 0.025
    /// assert_eq!(tax.round_to_cents(), Money::from_cents(2));
    /// ```
    #[inline]
    pub fn round_to_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(REPORTED_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to cents, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.round_to_cents().0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Money)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
        assert_eq!(money.to_string(), "10.99");
    }

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Money::from_decimal(Decimal::from(100)).to_string(), "100.00");
        assert_eq!(Money::zero().to_string(), "0.00");
        assert_eq!(Money::from_decimal(Decimal::new(12345, 3)).to_string(), "12.34");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_cents(2000));
    }

    #[test]
    fn test_apply_rate_does_not_round() {
        let amount = Money::from_cents(5); // 0.05
        let tax = amount.apply_rate(Rate::from_bps(5000)); // 50%
        assert_eq!(tax.amount(), Decimal::new(25, 3)); // 0.025, not 0.03
    }

    #[test]
    fn test_prorate() {
        let net = Money::from_cents(14000);
        let share = net.prorate(Money::from_cents(10000), Money::from_cents(20000));
        assert_eq!(share, Money::from_cents(7000));
    }

    #[test]
    fn test_prorate_large_amounts_does_not_overflow() {
        let quadrillion = Money::from_decimal(Decimal::from(1_000_000_000_000_000_i64));
        let whole = quadrillion + quadrillion;

        // net × part alone is 2e30, beyond Decimal's range.
        let share = whole.prorate(quadrillion, whole);
        assert_eq!(share, quadrillion);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_decimal(Decimal::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(max.checked_apply_rate(Rate::from_bps(20000)), None);
        assert_eq!(
            Money::checked_sum([Money::from_cents(100), Money::from_cents(250)]),
            Some(Money::from_cents(350))
        );
        assert_eq!(Money::checked_sum([max, max]), None);
    }

    #[test]
    fn test_prorate_zero_whole_is_zero() {
        let net = Money::from_cents(14000);
        assert!(net.prorate(Money::zero(), Money::zero()).is_zero());
    }

    #[test]
    fn test_bankers_rounding() {
        assert_eq!(
            Money::from_decimal(Decimal::new(125, 3)).round_to_cents(),
            Money::from_cents(12)
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(135, 3)).round_to_cents(),
            Money::from_cents(14)
        );
        assert_eq!(
            Money::from_decimal(Decimal::new(1234, 4)).round_to_cents(),
            Money::from_cents(12)
        );
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Money::from_cents(-100).non_negative(), Money::zero());
        assert_eq!(Money::from_cents(100).non_negative(), Money::from_cents(100));
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "10.5");

        let back: Money = serde_json::from_str("10.5").unwrap();
        assert_eq!(back, Money::from_cents(1050));
    }
}
