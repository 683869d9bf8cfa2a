//! # Domain Types
//!
//! Input types for a reconciliation: the order draft and its parts.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OrderDraft    │   │    LineItem     │   │  SplitPayment   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  items[]        │──►│  description    │   │  method         │       │
//! │  │  tax_rate       │   │  quantity       │   │  amount         │       │
//! │  │  discount       │   │  unit_price     │   │  reference      │       │
//! │  │  payment_method │   └─────────────────┘   └─────────────────┘       │
//! │  │  split_payments │──────────────────────────────────▲                │
//! │  │  tendered       │                                                    │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │ PaymentMethod   │   │  ChangePolicy   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  percent        │   │  Cash / Card    │   │  ReturnToPayer  │       │
//! │  │  8.25 = 8.25%   │   │  ... / Split    │   │  CreditToAccount│       │
//! │  └─────────────────┘   └─────────────────┘   │  Donate         │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Field names are camelCase and enum values snake_case, matching the JSON
//! the dashboard forms already post:
//! ```json
//! {
//!   "items": [{ "description": "Day pass", "quantity": 2, "unitPrice": 10 }],
//!   "taxRatePercent": 15,
//!   "paymentMethod": "cash",
//!   "amountTendered": 23,
//!   "payerCanCarryBalance": false
//! }
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (`8.25` = 8.25%).
///
/// Rates are kept exactly as entered. A rate outside `[0, 100]` is still
/// representable so that the engine can report it; [`TaxRate::clamped`]
/// gives the rate used for computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(type = "string")] Decimal);

impl TaxRate {
    /// Lowest accepted rate.
    pub const MIN: TaxRate = TaxRate(Decimal::ZERO);

    /// Highest accepted rate.
    pub const MAX: TaxRate = TaxRate(Decimal::ONE_HUNDRED);

    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percent(percent: Decimal) -> Self {
        TaxRate(percent)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> Decimal {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate::MIN
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// True when the rate lies in `[0, 100]`.
    pub fn is_in_range(&self) -> bool {
        *self >= TaxRate::MIN && *self <= TaxRate::MAX
    }

    /// Returns the rate clamped to `[0, 100]`.
    ///
    /// ```rust
    /// use meridian_core::types::TaxRate;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(TaxRate::from_percent(dec!(150)).clamped(), TaxRate::MAX);
    /// assert_eq!(TaxRate::from_percent(dec!(-5)).clamped(), TaxRate::MIN);
    /// ```
    pub fn clamped(self) -> Self {
        self.clamp(TaxRate::MIN, TaxRate::MAX)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the payer settles the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// Bank transfer, reconciled against the statement later.
    BankTransfer,
    /// Mobile money wallet.
    MobileMoney,
    /// Charged against the payer's stored account balance.
    AccountBalance,
    /// Several tenders; the rows in `split_payments` are authoritative.
    Split,
}

impl PaymentMethod {
    /// Returns true for [`PaymentMethod::Split`].
    #[inline]
    pub const fn is_split(&self) -> bool {
        matches!(self, PaymentMethod::Split)
    }

    /// Wire name of the method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::AccountBalance => "account_balance",
            PaymentMethod::Split => "split",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The method of one split row. Same as [`PaymentMethod`] without `Split`,
/// so a split can never nest inside a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderMethod {
    Cash,
    Card,
    BankTransfer,
    MobileMoney,
    AccountBalance,
}

impl From<TenderMethod> for PaymentMethod {
    fn from(method: TenderMethod) -> Self {
        match method {
            TenderMethod::Cash => PaymentMethod::Cash,
            TenderMethod::Card => PaymentMethod::Card,
            TenderMethod::BankTransfer => PaymentMethod::BankTransfer,
            TenderMethod::MobileMoney => PaymentMethod::MobileMoney,
            TenderMethod::AccountBalance => PaymentMethod::AccountBalance,
        }
    }
}

impl fmt::Display for TenderMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PaymentMethod::from(*self).fmt(f)
    }
}

// =============================================================================
// Change Handling
// =============================================================================

/// What happens to change owed back to the payer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChangePolicy {
    /// Hand the change back.
    #[default]
    ReturnToPayer,
    /// Keep it as credit on the payer's account.
    CreditToAccount,
    /// Payer donates the change.
    Donate,
}

// =============================================================================
// Business Unit
// =============================================================================

/// The business units that take payments through the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BusinessUnit {
    Gym,
    Spa,
    Manufacturing,
    Childcare,
    Marketing,
}

// =============================================================================
// Line Item
// =============================================================================

/// One purchasable unit within an order draft.
///
/// ## Line Totals Are Derived
/// `line_total` may be present on input (the forms echo it back) but it is
/// never trusted. [`LineItem::line_total`] always recomputes
/// `quantity × unit_price`; [`LineItem::is_stale`] reports a supplied value
/// that disagrees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Label shown on the receipt.
    pub description: String,

    /// Units purchased. Must be ≥ 1; signed so bad input can be reported.
    pub quantity: i64,

    /// Price per unit in major currency units.
    pub unit_price: Money,

    /// Caller-supplied line total, ignored by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub line_total: Option<Money>,
}

impl LineItem {
    /// Creates a line item without a stored line total.
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Money) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            line_total: None,
        }
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// True when a stored line total is present and differs from the product.
    pub fn is_stale(&self) -> bool {
        self.line_total
            .is_some_and(|stored| stored != self.line_total())
    }
}

// =============================================================================
// Split Payment
// =============================================================================

/// One tender within a split payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SplitPayment {
    pub method: TenderMethod,
    pub amount: Money,
    /// Card auth code, transfer reference, etc. May be empty for cash.
    #[serde(default)]
    pub reference: String,
}

impl SplitPayment {
    pub fn new(method: TenderMethod, amount: Money, reference: impl Into<String>) -> Self {
        SplitPayment {
            method,
            amount,
            reference: reference.into(),
        }
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The immutable input to one reconciliation.
///
/// Built fresh for every attempt (each keystroke in a form, each record in
/// a batch). Only `items` and `payment_method` are required on the wire;
/// everything else defaults to zero / empty / `false`.
///
/// ## Example
/// ```rust
/// use meridian_core::money::Money;
/// use meridian_core::types::{LineItem, OrderDraft, PaymentMethod, TaxRate};
/// use rust_decimal_macros::dec;
///
/// let draft = OrderDraft::new(
///     vec![LineItem::new("Day pass", 2, Money::new(dec!(10)))],
///     PaymentMethod::Cash,
/// )
/// .with_tax_rate(TaxRate::from_percent(dec!(15)))
/// .with_amount_tendered(Money::new(dec!(23)));
///
/// assert_eq!(draft.items.len(), 1);
/// assert!(!draft.payer_can_carry_balance);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub tax_rate_percent: TaxRate,

    #[serde(default)]
    pub discount_amount: Money,

    pub payment_method: PaymentMethod,

    /// Only meaningful when `payment_method` is [`PaymentMethod::Split`].
    #[serde(default)]
    pub split_payments: Vec<SplitPayment>,

    #[serde(default)]
    pub amount_tendered: Money,

    /// Supplied by the caller (usually from membership status).
    #[serde(default)]
    pub payer_can_carry_balance: bool,

    #[serde(default)]
    pub change_handling_policy: ChangePolicy,
}

impl OrderDraft {
    /// Creates a draft with zero tax, no discount and nothing tendered.
    pub fn new(items: Vec<LineItem>, payment_method: PaymentMethod) -> Self {
        OrderDraft {
            items,
            tax_rate_percent: TaxRate::zero(),
            discount_amount: Money::zero(),
            payment_method,
            split_payments: Vec::new(),
            amount_tendered: Money::zero(),
            payer_can_carry_balance: false,
            change_handling_policy: ChangePolicy::default(),
        }
    }

    pub fn with_tax_rate(mut self, rate: TaxRate) -> Self {
        self.tax_rate_percent = rate;
        self
    }

    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount_amount = discount;
        self
    }

    pub fn with_amount_tendered(mut self, tendered: Money) -> Self {
        self.amount_tendered = tendered;
        self
    }

    pub fn with_split_payments(mut self, rows: Vec<SplitPayment>) -> Self {
        self.split_payments = rows;
        self
    }

    pub fn with_carry_balance(mut self, allowed: bool) -> Self {
        self.payer_can_carry_balance = allowed;
        self
    }

    pub fn with_change_policy(mut self, policy: ChangePolicy) -> Self {
        self.change_handling_policy = policy;
        self
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
    fn test_line_total_is_optional_in_typescript() {
        let decl = LineItem::decl();
        assert!(decl.contains("lineTotal?:"), "{decl}");
        assert!(!decl.contains("lineTotal: Money | null"), "{decl}");
    }

    #[test]
    fn test_tax_rate_range() {
        assert!(TaxRate::from_percent(dec!(0)).is_in_range());
        assert!(TaxRate::from_percent(dec!(8.25)).is_in_range());
        assert!(TaxRate::from_percent(dec!(100)).is_in_range());
        assert!(!TaxRate::from_percent(dec!(100.01)).is_in_range());
        assert!(!TaxRate::from_percent(dec!(-0.01)).is_in_range());
    }

    #[test]
    fn test_tax_rate_clamped_keeps_in_range_values() {
        let rate = TaxRate::from_percent(dec!(8.25));
        assert_eq!(rate.clamped(), rate);
    }

    #[test]
    fn test_tax_rate_display() {
        assert_eq!(TaxRate::from_percent(dec!(8.250)).to_string(), "8.25%");
    }

    #[test]
    fn test_change_policy_default() {
        assert_eq!(ChangePolicy::default(), ChangePolicy::ReturnToPayer);
    }

    #[test]
    fn test_tender_method_maps_to_payment_method() {
        assert_eq!(
            PaymentMethod::from(TenderMethod::MobileMoney),
            PaymentMethod::MobileMoney
        );
        assert_eq!(TenderMethod::BankTransfer.to_string(), "bank_transfer");
    }

    #[test]
    fn test_line_total_is_recomputed() {
        let mut item = LineItem::new("Massage", 3, Money::new(dec!(45.50)));
        assert_eq!(item.line_total(), Money::new(dec!(136.50)));
        assert!(!item.is_stale());

        item.line_total = Some(Money::new(dec!(136.5)));
        assert!(!item.is_stale());

        item.line_total = Some(Money::new(dec!(100)));
        assert!(item.is_stale());
        assert_eq!(item.line_total(), Money::new(dec!(136.50)));
    }

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let json = r#"{
            "items": [{ "description": "Day pass", "quantity": 2, "unitPrice": 10 }],
            "paymentMethod": "bank_transfer"
        }"#;
        let draft: OrderDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.payment_method, PaymentMethod::BankTransfer);
        assert_eq!(draft.tax_rate_percent, TaxRate::zero());
        assert_eq!(draft.amount_tendered, Money::zero());
        assert!(draft.split_payments.is_empty());
        assert_eq!(draft.change_handling_policy, ChangePolicy::ReturnToPayer);
        assert_eq!(draft.items[0].unit_price, Money::new(dec!(10)));
    }

    #[test]
    fn test_split_row_rejects_nested_split() {
        let json = r#"{ "method": "split", "amount": 10 }"#;
        assert!(serde_json::from_str::<SplitPayment>(json).is_err());
    }
}
