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
//! │  In many quoting systems:                                               │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1000 cents / 3 = 333 cents (×3 = 999 cents)                         │
//! │    We KNOW we lost 1 cent, and handle it explicitly                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use luxscape_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(8500); // $85.00 per fixture
//!
//! // Arithmetic operations
//! let pair = price + price;                    // $170.00
//! let line_total = price.multiply_quantity(6); // $510.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(85.00); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for discounts, credits
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  PricingDefinition.unit_price_cents ──► LineItem.unit_price_cents      │
/// │                        │                       │                        │
/// │                        │                       └──► LineItem.line_total │
/// │                        └──► Displayed as "$85.00" in UI                 │
/// │                                                                         │
/// │  Subtotal ──► Discount ──► Tax Calculation ──► Quote Grand Total       │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use luxscape_core::money::Money;
    ///
    /// let price = Money::from_cents(8500); // Represents $85.00
    /// assert_eq!(price.cents(), 8500);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Pricing tables, calculations, and serialized quotes all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use luxscape_core::money::Money;
    ///
    /// let price = Money::from_cents(8550);
    /// assert_eq!(price.dollars(), 85);
    ///
    /// let credit = Money::from_cents(-550);
    /// assert_eq!(credit.dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
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

    /// Returns the absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use luxscape_core::money::Money;
    ///
    /// let credit = Money::from_cents(-550);
    /// assert_eq!(credit.abs().cents(), 550);
    /// ```
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax on this amount.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use luxscape_core::money::Money;
    /// use luxscape_core::types::TaxRate;
    ///
    /// let taxable = Money::from_cents(1000); // $10.00
    /// let rate = TaxRate::from_bps(825);     // 8.25%
    ///
    /// let tax = taxable.calculate_tax(rate);
    /// // $10.00 × 8.25% = $0.825 → rounds to $0.83 (83 cents)
    /// assert_eq!(tax.cents(), 83);
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Quote Subtotal: $510.00
    ///      │
    ///      ▼
    /// calculate_tax(8.25%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $42.08
    ///      │
    ///      ▼
    /// Grand Total: $552.08
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 825 = 8.25%
        // Formula: amount_cents * bps / 10000
        // With rounding: (amount_cents * bps + 5000) / 10000
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies a unit price by a fixture quantity.
    ///
    /// ## Example
    /// ```rust
    /// use luxscape_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(8500); // $85.00 per up light
    /// let line_total = unit_price.multiply_quantity(6);
    /// assert_eq!(line_total.cents(), 51000); // $510.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Up Light: $85.00
    /// Quantity: 6
    ///      │
    ///      ▼
    /// multiply_quantity(6) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $510.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging. Use frontend formatting for actual UI display
/// to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(8550);
        assert_eq!(money.cents(), 8550);
        assert_eq!(money.dollars(), 85);
        assert_eq!(money.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(8500)), "$85.00");
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut running = Money::zero();
        running += a;
        running += b;
        assert_eq!(running.cents(), 1500);
        running -= b;
        assert_eq!(running.cents(), 1000);
    }

    #[test]
    fn test_tax_calculation_basic() {
        // $10.00 at 10% = $1.00
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(1000); // 10%
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 100);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // $10.00 at 8.25% = $0.825 → $0.83 (rounds up via +5000)
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(825);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 83);
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
        let unit_price = Money::from_cents(8500);
        let line_total = unit_price.multiply_quantity(6);
        assert_eq!(line_total.cents(), 51000);

        // Quantity zero produces a zero line total
        assert_eq!(unit_price.multiply_quantity(0), Money::zero());
    }

    /// Documents the intentional precision behavior when a package price
    /// is split across identical fixtures.
    #[test]
    fn test_division_precision_loss_documented() {
        let package = Money::from_cents(1000);
        // Splitting $10.00 across three fixtures: $3.33 each
        let per_fixture = Money::from_cents(1000 / 3); // 333 cents
        let reconstructed = per_fixture.multiply_quantity(3); // 999 cents

        // We intentionally lose 1 cent - this is documented behavior
        assert_eq!(reconstructed.cents(), 999);
        assert_ne!(reconstructed.cents(), package.cents());

        let lost = package - reconstructed;
        assert_eq!(lost.cents(), 1);
    }
}
