//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many ordering systems:                                              │
//! │    Rs 458.00 × 15% = Rs 68.699999...  → Which paisa do we charge?      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    45800 × 15 / 100 = 6870 cents, rounded once, explicitly             │
//! │    Every discount and delivery fee reconciles to the paisa             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use zaiqa_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(45800); // Rs 458.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                        // Rs 916.00
//! let total = price + Money::from_cents(4000);    // Rs 498.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(458.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (paisa for PKR).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates for discount math
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// MenuItem.price_cents ──► CartLine.unit_price_cents ──► line totals
///                                      │
///                                      ▼
/// subtotal ──► promo discount ──► delivery charge ──► Order.total_cents
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_cents(45800); // Represents Rs 458.00
    /// assert_eq!(price.cents(), 45800);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use cents.
    /// Only the UI converts to rupees for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (rupees and paisa).
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let price = Money::from_major_minor(458, 50); // Rs 458.50
    /// assert_eq!(price.cents(), 45850);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (paisa) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Computes a whole-percentage share of this amount, rounded to the
    /// nearest cent.
    ///
    /// ## Implementation
    /// Integer math with an i128 intermediate: `(amount × pct + 50) / 100`.
    /// The +50 provides round-half-up at the cent boundary, applied exactly
    /// once per discount so totals reconcile.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(45800); // Rs 458.00
    /// assert_eq!(subtotal.percent_of(10).cents(), 4580); // Rs 45.80
    ///
    /// // Rounding: Rs 1.25 × 10% = 12.5 paisa → 13 paisa
    /// assert_eq!(Money::from_cents(125).percent_of(10).cents(), 13);
    /// ```
    pub fn percent_of(&self, pct: i64) -> Money {
        // i128 prevents overflow on large amounts
        let share = (self.0 as i128 * pct as i128 + 50) / 100;
        Money::from_cents(share as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use zaiqa_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(29900); // Rs 299.00
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 89700); // Rs 897.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the smaller of two Money values.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Clamps negative values up to zero.
    ///
    /// Used as the final step of total computation: a discount may never
    /// push a total below zero.
    #[inline]
    pub const fn clamp_non_negative(self) -> Money {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}Rs {}.{:02}", sign, self.rupees().abs(), self.cents_part())
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
        let money = Money::from_cents(45850);
        assert_eq!(money.cents(), 45850);
        assert_eq!(money.rupees(), 458);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(458, 50);
        assert_eq!(money.cents(), 45850);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(45800)), "Rs 458.00");
        assert_eq!(format!("{}", Money::from_cents(500)), "Rs 5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-Rs 5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "Rs 0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_percent_of_basic() {
        // Rs 458.00 at 10% = Rs 45.80, no rounding needed
        let subtotal = Money::from_cents(45800);
        assert_eq!(subtotal.percent_of(10).cents(), 4580);
    }

    #[test]
    fn test_percent_of_with_rounding() {
        // Rs 1.25 at 10% = 12.5 paisa → 13 paisa (round half up)
        assert_eq!(Money::from_cents(125).percent_of(10).cents(), 13);
        // Rs 0.33 at 50% = 16.5 paisa → 17 paisa
        assert_eq!(Money::from_cents(33).percent_of(50).cents(), 17);
    }

    #[test]
    fn test_percent_of_full_and_zero() {
        let subtotal = Money::from_cents(12345);
        assert_eq!(subtotal.percent_of(100), subtotal);
        assert_eq!(subtotal.percent_of(0), Money::zero());
    }

    #[test]
    fn test_min_and_clamp() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!(a.min(b), b);
        assert_eq!(b.min(a), b);

        assert_eq!(Money::from_cents(-100).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_cents(100).clamp_non_negative().cents(), 100);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(29900);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 89700);
    }
}
