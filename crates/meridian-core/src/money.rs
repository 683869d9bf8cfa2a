//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The dashboard forms only called toFixed(2) when displaying, so two    │
//! │  screens could disagree by a cent on the same order.                   │
//! │                                                                         │
//! │  OUR SOLUTION: Exact base-10 decimals + explicit rounding              │
//! │    0.1 + 0.2 = 0.3 exactly                                             │
//! │    Tax, totals, change and balances are rounded half-up to 2 places    │
//! │    at the step where they are produced                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(10.99));
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // $21.98
//! let total = price + Money::from_cents(500);  // $15.99
//! assert_eq!(total.to_string(), "$15.99");
//! assert_eq!(doubled.amount(), dec!(21.98));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::MONEY_DECIMAL_PLACES;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major currency units (dollars), held as an exact decimal.
///
/// ## Design Decisions
/// - **Signed**: drafts come from user input, so negative values must be
///   representable in order to be reported instead of silently dropped
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Saturating arithmetic**: sums of absurd inputs pin at the `Decimal`
///   bounds instead of panicking, so reconciliation always returns a result
/// - **Serde**: serializes as a decimal string (`"23.00"`), accepts a JSON
///   number or a string on input
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  LineItem.unit_price ──► line total ──► subtotal ──► tax ──► total      │
/// │                                                                         │
/// │  amount_tendered / split rows ──► change due / outstanding balance      │
/// │                                                                         │
/// │  EVERY monetary value in a reconciliation flows through this type       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a decimal amount in major units.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(10.99));
    /// assert_eq!(price.amount(), dec!(10.99));
    /// ```
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.to_string(), "$10.99");
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Floors the value at zero, keeping the decimal scale.
    ///
    /// A rounded `-3.00` becomes `0.00`, not `0`.
    ///
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-300).non_negative(), Money::zero());
    /// assert_eq!(Money::from_cents(-300).non_negative().to_json_string(), "0.00");
    /// assert_eq!(Money::from_cents(300).non_negative(), Money::from_cents(300));
    /// ```
    #[inline]
    pub fn non_negative(self) -> Self {
        if self.is_positive() {
            self
        } else {
            let mut zero = Decimal::ZERO;
            zero.rescale(self.0.scale());
            Money(zero)
        }
    }

    /// Puts the amount on the canonical scale: trailing zeros dropped, at
    /// least 2 decimal places, never rounded.
    ///
    /// Value-equal amounts (`10`, `10.0`, `10.000`) get the same
    /// representation, so they serialize identically.
    ///
    /// ```rust
    /// use meridian_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(10)).canonical().to_json_string(), "10.00");
    /// assert_eq!(Money::new(dec!(10.000)).canonical().to_json_string(), "10.00");
    /// assert_eq!(Money::new(dec!(60.005)).canonical().to_json_string(), "60.005");
    /// ```
    pub fn canonical(self) -> Self {
        let mut amount = self.0.normalize();
        if amount.scale() < MONEY_DECIMAL_PLACES {
            amount.rescale(MONEY_DECIMAL_PLACES);
        }
        Money(amount)
    }

    /// The exact wire representation (`"23.00"` without quotes).
    pub fn to_json_string(&self) -> String {
        self.0.to_string()
    }

    /// Rounds to 2 decimal places, half-up (midpoints move away from zero).
    ///
    /// ## Half-Up vs Bankers Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  value     half-up (this)     bankers                               │
    /// │  0.125  →  0.13               0.12                                  │
    /// │  0.135  →  0.14               0.14                                  │
    /// │  2.675  →  2.68               2.68                                  │
    /// │                                                                     │
    /// │  Receipts printed by the front desk use half-up, so reconciliation │
    /// │  must agree with them to the cent.                                 │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(0.125)).round2().amount(), dec!(0.13));
    /// assert_eq!(Money::new(dec!(-0.125)).round2().amount(), dec!(-0.13));
    /// ```
    #[inline]
    pub fn round2(self) -> Self {
        self.round_to(MONEY_DECIMAL_PLACES)
    }

    /// Rounds half-up to an arbitrary number of decimal places.
    ///
    /// The result always carries exactly `decimals` places, so `23` becomes
    /// `23.00` and serializes that way.
    #[inline]
    pub fn round_to(self, decimals: u32) -> Self {
        let mut amount = self
            .0
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(decimals);
        Money(amount)
    }

    /// Calculates tax at the given percentage, rounded half-up to the cent.
    ///
    /// ## Formula
    /// `round2(amount × percent / 100)`
    ///
    /// The rate is used as given; clamping an out-of-range rate is the
    /// engine's job.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    /// use meridian_core::types::TaxRate;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = Money::new(dec!(10.00));
    /// let rate = TaxRate::from_percent(dec!(8.25));
    ///
    /// // $10.00 × 8.25% = $0.825 → rounds to $0.83
    /// assert_eq!(price.calculate_tax(rate).amount(), dec!(0.83));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Order Subtotal: $20.00
    ///      │
    ///      ▼
    /// calculate_tax(15%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $3.00
    ///      │
    ///      ▼
    /// Grand Total: $23.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let raw = self.0.saturating_mul(rate.percent()) / Decimal::ONE_HUNDRED;
        Money(raw).round2()
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total, Money::from_cents(897)); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Formats the amount with a fixed number of decimals and no symbol.
    ///
    /// ```rust
    /// use meridian_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2300).to_fixed(2), "23.00");
    /// assert_eq!(Money::from_cents(2350).to_fixed(0), "24");
    /// ```
    pub fn to_fixed(&self, decimals: u32) -> String {
        self.round_to(decimals).0.to_string()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and reports. The dashboard formats amounts itself
/// to handle localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}", sign, self.abs().to_fixed(MONEY_DECIMAL_PLACES))
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::new(dec!(5))), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
        assert_eq!(format!("{}", Money::new(dec!(1.005))), "$1.01");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!(a + b, Money::from_cents(1500));
        assert_eq!(a - b, Money::from_cents(500));
        assert_eq!(a * 3, Money::from_cents(3000));
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        let sum = Money::new(dec!(0.1)) + Money::new(dec!(0.2));
        assert_eq!(sum.amount(), dec!(0.3));
    }

    #[test]
    fn test_tax_calculation_basic() {
        // $20.00 at 15% = $3.00
        let tax = Money::new(dec!(20)).calculate_tax(TaxRate::from_percent(dec!(15)));
        assert_eq!(tax.amount(), dec!(3));
    }

    #[test]
    fn test_tax_calculation_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let tax = Money::new(dec!(10)).calculate_tax(TaxRate::from_percent(dec!(8.25)));
        assert_eq!(tax.amount(), dec!(0.83));

        // $0.50 at 5% = $0.025 → $0.03 (bankers rounding would give $0.02)
        let tax = Money::new(dec!(0.50)).calculate_tax(TaxRate::from_percent(dec!(5)));
        assert_eq!(tax.amount(), dec!(0.03));
    }

    #[test]
    fn test_round2_pads_scale() {
        let json = serde_json::to_string(&Money::new(dec!(23)).round2()).unwrap();
        assert_eq!(json, "\"23.00\"");
    }

    #[test]
    fn test_non_negative_keeps_scale() {
        let floored = Money::new(dec!(-3.4)).round2().non_negative();
        assert!(floored.is_zero());
        assert_eq!(serde_json::to_string(&floored).unwrap(), "\"0.00\"");

        let exact_zero = Money::new(dec!(5)).round2() - Money::new(dec!(5)).round2();
        assert_eq!(exact_zero.non_negative().to_json_string(), "0.00");

        let kept = Money::new(dec!(1.50)).non_negative();
        assert_eq!(kept.to_json_string(), "1.50");
    }

    #[test]
    fn test_canonical_scale() {
        assert_eq!(Money::new(dec!(20)).canonical().to_json_string(), "20.00");
        assert_eq!(Money::new(dec!(20.0)).canonical().to_json_string(), "20.00");
        assert_eq!(Money::new(dec!(20.000)).canonical().to_json_string(), "20.00");
        assert_eq!(Money::new(dec!(0.125)).canonical().to_json_string(), "0.125");
        assert_eq!(Money::zero().canonical().to_json_string(), "0.00");
        assert_eq!(Money::new(dec!(7.5)).canonical(), Money::new(dec!(7.5)));
    }

    #[test]
    fn test_round2_negative_midpoint() {
        assert_eq!(Money::new(dec!(-2.675)).round2().amount(), dec!(-2.68));
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
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(897));
    }

    #[test]
    fn test_saturating_instead_of_panicking() {
        let huge = Money::new(Decimal::MAX);
        assert_eq!(huge + huge, Money::new(Decimal::MAX));
        assert_eq!(huge.multiply_quantity(1_000), Money::new(Decimal::MAX));
    }

    #[test]
    fn test_sum() {
        let parts = [Money::from_cents(3000), Money::from_cents(2000)];
        let total: Money = parts.iter().sum();
        assert_eq!(total, Money::from_cents(5000));
    }

    #[test]
    fn test_to_fixed_pads_and_rounds() {
        assert_eq!(Money::new(dec!(3)).to_fixed(2), "3.00");
        assert_eq!(Money::new(dec!(3.456)).to_fixed(2), "3.46");
        assert_eq!(Money::new(dec!(3.5)).to_fixed(0), "4");
    }

    #[test]
    fn test_serializes_as_decimal_string() {
        let json = serde_json::to_string(&Money::new(dec!(23.00))).unwrap();
        assert_eq!(json, "\"23.00\"");

        let from_number: Money = serde_json::from_str("23.5").unwrap();
        let from_string: Money = serde_json::from_str("\"23.5\"").unwrap();
        assert_eq!(from_number, from_string);
    }
}
