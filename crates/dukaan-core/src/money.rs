//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values and
//! percentage rates safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹350.00 is stored as 35000 paise (i64)                               │
//! │    All arithmetic is exact; rounding happens once, explicitly,          │
//! │    when a percentage rate is applied                                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use dukaan_core::money::{Money, Rate};
//!
//! let price = Money::from_rupees(350);      // ₹350.00
//! let line = price.times(5);                // ₹1750.00
//!
//! let discount = Rate::from_percent(10.0);  // 10%
//! assert_eq!(line.apply_rate(discount), Money::from_rupees(175));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paise for INR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values; a negative customer balance
///   means the shop owes the customer credit
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde transparent**: Serializes as a bare integer in the JSON blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let price = Money::from_rupees(350);
    /// assert_eq!(price.paise(), 35000);
    /// ```
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the larger of two values.
    #[inline]
    pub fn max(self, other: Money) -> Money {
        Money(self.0.max(other.0))
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(320);
    /// assert_eq!(unit_price.times(3), Money::from_rupees(960));
    /// ```
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a percentage rate and returns the resulting amount.
    ///
    /// ## Implementation
    /// Integer math with half-up rounding: `(amount * bps + 5000) / 10000`.
    /// i128 intermediate prevents overflow on large amounts.
    ///
    /// ## Example
    /// ```rust
    /// use dukaan_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_rupees(200);
    /// let discount = subtotal.apply_rate(Rate::from_percent(10.0));
    /// assert_eq!(discount, Money::from_rupees(20));
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(amount as i64)
    }

    /// Divides evenly by a quantity, truncating toward zero.
    ///
    /// Used to reconstruct a unit price from `subtotal / quantity` when an
    /// old sale record carries no price snapshot. Division by zero or a
    /// negative quantity yields zero rather than panicking.
    pub fn divided_by(&self, qty: i64) -> Money {
        if qty <= 0 {
            return Money::zero();
        }
        Money(self.0 / qty)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate (discount or tax) in basis points.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5%, 1800 bps = 18% (standard GST)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percent(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 100 == 0 {
            write!(f, "{}%", self.0 / 100)
        } else {
            write!(f, "{}%", self.percent())
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is what ends up on the plain-text invoice. A richer frontend would
/// apply its own locale-aware formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Sum of Money values.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(350);
        assert_eq!(money.paise(), 35000);
        assert_eq!(money.rupees(), 350);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(109950)), "₹1099.50");
        assert_eq!(format!("{}", Money::from_rupees(5)), "₹5.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((a * 3).paise(), 3000);
        assert_eq!(a.times(2), Money::from_rupees(20));
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(1), Money::from_rupees(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(3));
    }

    #[test]
    fn test_apply_rate_exact() {
        // ₹200 at 10% = ₹20
        let amount = Money::from_rupees(200);
        assert_eq!(amount.apply_rate(Rate::from_percent(10.0)), Money::from_rupees(20));
    }

    #[test]
    fn test_apply_rate_with_rounding() {
        // ₹10.00 at 8.25% = ₹0.825 → rounds half-up to ₹0.83
        let amount = Money::from_rupees(10);
        let tax = amount.apply_rate(Rate::from_bps(825));
        assert_eq!(tax.paise(), 83);
    }

    #[test]
    fn test_divided_by() {
        let subtotal = Money::from_rupees(1000);
        assert_eq!(subtotal.divided_by(20), Money::from_rupees(50));
        assert_eq!(subtotal.divided_by(0), Money::zero());
        assert_eq!(subtotal.divided_by(-3), Money::zero());
    }

    #[test]
    fn test_rate_from_percent() {
        assert_eq!(Rate::from_percent(10.0).bps(), 1000);
        assert_eq!(Rate::from_percent(8.25).bps(), 825);
        assert_eq!(format!("{}", Rate::from_percent(5.0)), "5%");
        assert_eq!(format!("{}", Rate::from_bps(825)), "8.25%");
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_paise(100).is_positive());
        assert!(Money::from_paise(-100).is_negative());
    }

    #[test]
    fn test_max() {
        let owed = Money::from_rupees(-50);
        assert_eq!(owed.max(Money::zero()), Money::zero());
        assert_eq!(Money::from_rupees(5).max(Money::zero()), Money::from_rupees(5));
    }
}
