//! # Money Module
//!
//! Provides the `Money` and `Percentage` types for currency math.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Discounts make it worse: 20% of $12.00 must be exactly $2.40,          │
//! │  and 12.5% of $9.50 must be exactly $1.1875 until someone rounds it.    │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    No rounding happens inside arithmetic. Rounding to cents is an       │
//! │    explicit display step (`round_to_cents`).                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use griddle_core::money::{Money, Percentage};
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_cents(500); // $5.00
//! let line = price * 2;               // $10.00
//!
//! let twenty = Percentage::new(Decimal::from(20)).unwrap();
//! assert_eq!(twenty.of(Money::from_cents(1200)), Money::from_cents(240));
//! # let _ = line;
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::error::{DomainError, DomainResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in the store currency.
///
/// Wraps `Decimal` so that `unit price × quantity`, sums and percentage
/// discounts are exact. Equality is numeric: `2.4 == 2.40`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use griddle_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Rounds half away from zero to two decimal places.
    ///
    /// Only for presentation; pricing never calls this.
    pub fn round_to_cents(&self) -> Money {
        Money(self.0.round_dp_with_strategy(
            2,
            rust_decimal::RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Money {
        Money(self.0 * Decimal::from(qty))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}${:.2}", sign, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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

// =============================================================================
// Percentage
// =============================================================================

/// A discount percentage in the half-open range `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Percentage(Decimal);

impl Percentage {
    /// Validates and wraps a percentage value.
    pub fn new(value: Decimal) -> DomainResult<Self> {
        if value <= Decimal::ZERO {
            return Err(DomainError::MustBePositive {
                field: "Discount percentage",
            });
        }

        if value > Decimal::ONE_HUNDRED {
            return Err(DomainError::PercentageTooHigh);
        }

        Ok(Percentage(value))
    }

    /// Returns the raw value (20 means 20%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// `amount * value / 100`, unrounded.
    pub fn of(&self, amount: Money) -> Money {
        Money(amount.0 * (self.0 / Decimal::ONE_HUNDRED))
    }
}

impl TryFrom<Decimal> for Percentage {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl From<Percentage> for Decimal {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "$10.99");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a * 3, Money::from_cents(3000));

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_cents(2000));
    }

    #[test]
    fn test_percentage_is_exact() {
        let twenty = Percentage::new(Decimal::from(20)).unwrap();
        assert_eq!(twenty.of(Money::from_cents(1200)), Money::from_cents(240));

        // 12.5% of $9.50 = $1.1875, no rounding applied
        let odd = Percentage::new(Decimal::new(125, 1)).unwrap();
        let amount = odd.of(Money::from_cents(950));
        assert_eq!(amount.amount(), Decimal::new(11875, 4));
        assert_eq!(amount.round_to_cents(), Money::from_cents(119));
    }

    #[test]
    fn test_percentage_bounds() {
        assert!(Percentage::new(Decimal::ZERO).is_err());
        assert!(Percentage::new(Decimal::from(-5)).is_err());
        assert_eq!(
            Percentage::new(Decimal::new(10001, 2)),
            Err(DomainError::PercentageTooHigh)
        );
        assert!(Percentage::new(Decimal::ONE_HUNDRED).is_ok());
    }

    #[test]
    fn test_percentage_rejects_invalid_json() {
        let parsed: Result<Percentage, _> = serde_json::from_str("\"0\"");
        assert!(parsed.is_err());

        let parsed: Percentage = serde_json::from_str("\"15\"").unwrap();
        assert_eq!(parsed.value(), Decimal::from(15));
    }
}
