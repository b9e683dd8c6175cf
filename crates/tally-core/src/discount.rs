//! # Discount Policy
//!
//! Maps a discount code to a rate of the subtotal.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  code            │  rate                     │
//! │  ────────────────┼─────────────────────────  │
//! │  "student"       │  1000 bps (10%)           │
//! │  "black_friday"  │  3000 bps (30%)           │
//! │  anything else   │  0                        │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Unknown, empty and missing codes are not errors; they mean "no discount".

use crate::money::Money;
use crate::types::Rate;

/// Code for the 10% student discount.
pub const STUDENT: &str = "student";

/// Code for the 30% Black Friday discount.
pub const BLACK_FRIDAY: &str = "black_friday";

/// An ordered `(code → rate)` table.
///
/// Lookups scan in insertion order and the first matching code wins, so
/// adding a duplicate never shadows an earlier entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountPolicy {
    codes: Vec<(String, Rate)>,
}

impl DiscountPolicy {
    /// A policy with no codes at all.
    pub fn empty() -> Self {
        DiscountPolicy { codes: Vec::new() }
    }

    /// The built-in codes: `student` and `black_friday`.
    pub fn standard() -> Self {
        DiscountPolicy::empty()
            .with_code(STUDENT, Rate::from_bps(1000))
            .with_code(BLACK_FRIDAY, Rate::from_bps(3000))
    }

    /// Appends a code to the table.
    pub fn with_code(mut self, code: impl Into<String>, rate: Rate) -> Self {
        self.codes.push((code.into(), rate));
        self
    }

    /// Resolves a code to its rate. Never fails.
    pub fn rate_for(&self, code: Option<&str>) -> Rate {
        let Some(code) = code.filter(|c| !c.is_empty()) else {
            return Rate::zero();
        };

        self.codes
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, rate)| *rate)
            .unwrap_or_else(Rate::zero)
    }

    /// The discount amount for a subtotal, never more than the subtotal.
    pub fn amount_for(&self, code: Option<&str>, subtotal: Money) -> Money {
        subtotal
            .checked_apply_rate(self.rate_for(code))
            .map_or(subtotal, |amount| amount.min(subtotal))
    }

    /// Iterates the table in order.
    pub fn codes(&self) -> impl Iterator<Item = (&str, Rate)> {
        self.codes.iter().map(|(code, rate)| (code.as_str(), *rate))
    }
}

impl Default for DiscountPolicy {
    fn default() -> Self {
        DiscountPolicy::standard()
    }
}
