//! # Reconciliation Engine
//!
//! Turns an [`OrderDraft`] into a [`ReconciliationResult`]: the financial
//! breakdown plus every broken rule.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         reconcile(draft)                                │
//! │                                                                         │
//! │  1. subtotal   = Σ qty × unit_price        (valid items only)           │
//! │  2. tax        = round2(subtotal × clamp(rate, 0, 100) / 100)           │
//! │  3. total      = max(0, round2(subtotal + tax − clamp(discount)))       │
//! │  4. tendered   = Σ split rows      if method = split                    │
//! │                  amount_tendered   otherwise                            │
//! │  5. change     = max(0, round2(tendered − total))                       │
//! │  6. outstanding= max(0, round2(total − tendered))                       │
//! │  7. outstanding > 0 and payer cannot carry a balance → failure          │
//! │  8. valid      = no failures                                            │
//! │                                                                         │
//! │  Every check runs; nothing short-circuits. Bad inputs are clamped or   │
//! │  zeroed for the arithmetic and reported as failures.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! No I/O, no logging, no clock, no randomness. Equal drafts always give
//! equal results, and the engine is `Send + Sync` so any number of callers
//! can share one.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::failure::{item_field, split_field, Failure, FailureCode};
use crate::money::Money;
use crate::types::{ChangePolicy, LineItem, OrderDraft};
use crate::validation::{
    validate_description, validate_non_negative, validate_quantity, validate_tax_rate,
    validate_unit_price,
};

/// Largest accepted gap between the split rows and the stated amount tendered.
pub const DEFAULT_SPLIT_TOLERANCE: Money = Money::new(dec!(0.01));

// =============================================================================
// Configuration
// =============================================================================

/// Engine settings. The default reproduces the documented rules exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// See [`DEFAULT_SPLIT_TOLERANCE`].
    pub split_tolerance: Money,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            split_tolerance: DEFAULT_SPLIT_TOLERANCE,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> CoreResult<()> {
        if self.split_tolerance.is_negative() {
            return Err(CoreError::InvalidConfig(format!(
                "split tolerance must not be negative, got {}",
                self.split_tolerance.amount()
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// Where the change due goes, according to the draft's [`ChangePolicy`].
///
/// Exactly one field carries the change; the other two are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChangeAllocation {
    /// Handed back to the payer.
    pub returned: Money,
    /// Kept as credit on the payer's account.
    pub credited: Money,
    /// Donated by the payer.
    pub donated: Money,
}

impl ChangeAllocation {
    /// Routes `change_due` according to `policy`.
    ///
    /// ```rust
    /// use meridian_core::engine::ChangeAllocation;
    /// use meridian_core::money::Money;
    /// use meridian_core::types::ChangePolicy;
    ///
    /// let change = Money::from_cents(250);
    /// let split = ChangeAllocation::allocate(change, ChangePolicy::CreditToAccount);
    /// assert_eq!(split.credited, change);
    /// assert!(split.returned.is_zero() && split.donated.is_zero());
    /// ```
    pub fn allocate(change_due: Money, policy: ChangePolicy) -> Self {
        let zero = Money::zero().round2();
        let mut allocation = ChangeAllocation {
            returned: zero,
            credited: zero,
            donated: zero,
        };
        match policy {
            ChangePolicy::ReturnToPayer => allocation.returned = change_due,
            ChangePolicy::CreditToAccount => allocation.credited = change_due,
            ChangePolicy::Donate => allocation.donated = change_due,
        }
        allocation
    }
}

/// The complete output of one reconciliation.
///
/// A plain value: the engine never touches it after returning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Sum of valid line totals, unrounded, at least 2 decimal places.
    pub subtotal: Money,
    pub tax_amount: Money,
    /// Discount actually applied after clamping to subtotal + tax.
    pub applied_discount: Money,
    /// subtotal + tax − applied discount, never negative.
    pub total: Money,
    /// The tendered amount used for change/balance (the split total for splits).
    pub amount_tendered: Money,
    pub change_due: Money,
    pub outstanding_balance: Money,
    /// Sum of split rows; zero unless the method is split.
    pub split_total: Money,
    pub change_allocation: ChangeAllocation,
    /// Recomputed per-item totals in input order; zero for invalid items.
    pub line_totals: Vec<Money>,
    /// True iff `failures` is empty.
    pub valid: bool,
    pub failures: Vec<Failure>,
}

impl ReconciliationResult {
    /// True if any failure carries `code`.
    pub fn has_failure(&self, code: FailureCode) -> bool {
        self.failures.iter().any(|f| f.code == code)
    }

    /// Failures anchored to `field`, in order.
    pub fn failures_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Failure> + 'a {
        self.failures.iter().filter(move |f| f.field == field)
    }

    /// True when nothing remains owed.
    pub fn is_settled(&self) -> bool {
        self.outstanding_balance.is_zero()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Stateless reconciliation engine.
///
/// ## Example
/// ```rust
/// use meridian_core::engine::ReconciliationEngine;
/// use meridian_core::money::Money;
/// use meridian_core::types::{LineItem, OrderDraft, PaymentMethod, TaxRate};
/// use rust_decimal_macros::dec;
///
/// let engine = ReconciliationEngine::default();
/// let draft = OrderDraft::new(
///     vec![LineItem::new("Day pass", 2, Money::new(dec!(10)))],
///     PaymentMethod::Cash,
/// )
/// .with_tax_rate(TaxRate::from_percent(dec!(15)))
/// .with_amount_tendered(Money::new(dec!(23)));
///
/// let result = engine.reconcile(&draft);
/// assert_eq!(result.total, Money::new(dec!(23)));
/// assert!(result.valid);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    config: EngineConfig,
}

impl ReconciliationEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(ReconciliationEngine { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the breakdown of `draft` and lists every broken rule.
    ///
    /// Never fails and never panics: problems are reported in
    /// [`ReconciliationResult::failures`].
    pub fn reconcile(&self, draft: &OrderDraft) -> ReconciliationResult {
        let mut failures = Vec::new();

        // 1. Subtotal
        let line_totals = check_items(&draft.items, &mut failures);
        let subtotal: Money = line_totals.iter().sum();

        // 2. Tax
        if let Err(err) = validate_tax_rate(draft.tax_rate_percent) {
            failures.push(Failure::from_validation(
                "taxRatePercent",
                FailureCode::OutOfRange,
                &err,
            ));
        }
        let tax_amount = subtotal.calculate_tax(draft.tax_rate_percent.clamped());

        // 3. Discount and total
        let before_discount = subtotal + tax_amount;
        let discount = non_negative_input(
            "discountAmount",
            "discount",
            draft.discount_amount,
            &mut failures,
        );
        let applied_discount = if discount > before_discount {
            failures.push(Failure::new(
                "discountAmount",
                FailureCode::DiscountExceedsTotal,
                format!(
                    "discount of {} exceeds the order total of {}",
                    discount, before_discount
                ),
            ));
            before_discount
        } else {
            discount
        };
        let total = (before_discount - applied_discount).round2().non_negative();

        // 4. Effective amount tendered
        let stated = non_negative_input(
            "amountTendered",
            "amount tendered",
            draft.amount_tendered,
            &mut failures,
        );
        let (split_total, tendered) = self.settle_tender(draft, stated, &mut failures);

        // 5-6. Change and balance
        let change_due = (tendered - total).round2().non_negative();
        let outstanding_balance = (total - tendered).round2().non_negative();

        // 7. Only payers allowed to carry a balance may leave one
        if outstanding_balance.is_positive() && !draft.payer_can_carry_balance {
            failures.push(Failure::new(
                "amountTendered",
                FailureCode::InsufficientPayment,
                format!(
                    "payment is short by {}; this payer must pay in full",
                    outstanding_balance
                ),
            ));
        }

        // Amounts echoed from input go on one scale so value-equal drafts
        // serialize identically.
        ReconciliationResult {
            subtotal: subtotal.canonical(),
            tax_amount,
            applied_discount: applied_discount.canonical(),
            total,
            amount_tendered: tendered.canonical(),
            change_due,
            outstanding_balance,
            split_total: split_total.canonical(),
            change_allocation: ChangeAllocation::allocate(
                change_due,
                draft.change_handling_policy,
            ),
            line_totals: line_totals.into_iter().map(Money::canonical).collect(),
            // 8.
            valid: failures.is_empty(),
            failures,
        }
    }

    /// Parses a JSON order draft and reconciles it.
    ///
    /// ## Errors
    /// [`CoreError::InvalidArgument`] when `input` is not an order draft
    /// (not JSON, `null`, `items` missing or not an array, ...). Business
    /// rule violations are never errors.
    pub fn reconcile_json(&self, input: &str) -> CoreResult<ReconciliationResult> {
        let draft = parse_draft(input)?;
        Ok(self.reconcile(&draft))
    }

    /// Returns `(split_total, effective_tendered)`.
    fn settle_tender(
        &self,
        draft: &OrderDraft,
        stated: Money,
        failures: &mut Vec<Failure>,
    ) -> (Money, Money) {
        if !draft.payment_method.is_split() {
            if !draft.split_payments.is_empty() {
                failures.push(Failure::new(
                    "splitPayments",
                    FailureCode::UnexpectedSplit,
                    format!(
                        "split rows are only used with the split payment method, not {}",
                        draft.payment_method
                    ),
                ));
            }
            return (Money::zero(), stated);
        }

        if draft.split_payments.is_empty() {
            failures.push(Failure::new(
                "splitPayments",
                FailureCode::EmptySplit,
                "split payment needs at least one payment row",
            ));
        }

        let mut split_total = Money::zero();
        for (index, row) in draft.split_payments.iter().enumerate() {
            split_total += non_negative_input(
                &split_field(index, "amount"),
                "split amount",
                row.amount,
                failures,
            );
        }

        // The split rows are authoritative; the stated amount is only checked.
        if (draft.amount_tendered - split_total).abs() > self.config.split_tolerance {
            failures.push(Failure::new(
                "amountTendered",
                FailureCode::SplitMismatch,
                format!(
                    "split payments add up to {} but amount tendered is {}",
                    split_total, draft.amount_tendered
                ),
            ));
        }

        (split_total, split_total)
    }
}

/// Reconciles `draft` with the default configuration.
///
/// ## Example
/// ```rust
/// use meridian_core::{reconcile, FailureCode, LineItem, Money, OrderDraft, PaymentMethod};
///
/// let draft = OrderDraft::new(vec![LineItem::new("Locker", 1, Money::from_cents(500))], PaymentMethod::Cash)
///     .with_amount_tendered(Money::from_cents(200));
///
/// let result = reconcile(&draft);
/// assert_eq!(result.outstanding_balance, Money::from_cents(300));
/// assert!(result.has_failure(FailureCode::InsufficientPayment));
/// ```
pub fn reconcile(draft: &OrderDraft) -> ReconciliationResult {
    ReconciliationEngine::default().reconcile(draft)
}

/// Parses and reconciles a JSON draft with the default configuration.
pub fn reconcile_json(input: &str) -> CoreResult<ReconciliationResult> {
    ReconciliationEngine::default().reconcile_json(input)
}

/// Parses a JSON order draft.
///
/// Anything that does not deserialize into an [`OrderDraft`] is a caller
/// contract violation and maps to [`CoreError::InvalidArgument`].
pub fn parse_draft(input: &str) -> CoreResult<OrderDraft> {
    serde_json::from_str(input).map_err(|e| CoreError::InvalidArgument(e.to_string()))
}

// =============================================================================
// Rule Helpers
// =============================================================================

/// Returns line totals in input order, recording empty-order and per-item failures.
fn check_items(items: &[LineItem], failures: &mut Vec<Failure>) -> Vec<Money> {
    if items.is_empty() {
        failures.push(Failure::new(
            "items",
            FailureCode::EmptyOrder,
            "order must contain at least one line item",
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match check_item(item) {
            Ok(()) => item.line_total(),
            Err((attribute, err)) => {
                failures.push(Failure::from_validation(
                    item_field(index, attribute),
                    FailureCode::InvalidItem,
                    &err,
                ));
                Money::zero()
            }
        })
        .collect()
}

/// First broken rule of an item as `(wire attribute, error)`.
fn check_item(item: &LineItem) -> Result<(), (&'static str, ValidationError)> {
    validate_quantity(item.quantity).map_err(|e| ("quantity", e))?;
    validate_unit_price(item.unit_price).map_err(|e| ("unitPrice", e))?;
    validate_description(&item.description).map_err(|e| ("description", e))?;
    Ok(())
}

/// Returns `amount`, or zero after recording an `invalid_amount` failure.
fn non_negative_input(
    field: &str,
    label: &str,
    amount: Money,
    failures: &mut Vec<Failure>,
) -> Money {
    match validate_non_negative(label, amount) {
        Ok(()) => amount,
        Err(err) => {
            failures.push(Failure::from_validation(
                field,
                FailureCode::InvalidAmount,
                &err,
            ));
            Money::zero()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
