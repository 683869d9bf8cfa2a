//! Property-based tests for the reconciliation engine.
//!
//! These tests verify invariants that should hold for any draft the data
//! types can carry, including nonsense the forms should never send.

use meridian_core::{
    reconcile, ChangePolicy, FailureCode, LineItem, Money, OrderDraft, PaymentMethod, SplitPayment, TaxRate,
    TenderMethod,
};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// Generate an amount in cents, including negatives (-100.00 to 10000.00).
fn arb_money() -> impl Strategy<Value = Money> {
    (-10_000i64..=1_000_000i64).prop_map(Money::from_cents)
}

/// Generate a tax rate with up to 3 decimal places, sometimes out of range.
fn arb_tax_rate() -> impl Strategy<Value = TaxRate> {
    (-50_000i64..=150_000i64).prop_map(|milli| TaxRate::from_percent(Decimal::new(milli, 3)))
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (
        prop::sample::select(vec!["Day pass", "Facial", "Widget", "", "Ad slot"]),
        -2i64..20,
        arb_money(),
    )
        .prop_map(|(description, qty, price)| LineItem::new(description, qty, price))
}

fn arb_tender() -> impl Strategy<Value = TenderMethod> {
    prop::sample::select(vec![
        TenderMethod::Cash,
        TenderMethod::Card,
        TenderMethod::BankTransfer,
        TenderMethod::MobileMoney,
        TenderMethod::AccountBalance,
    ])
}

fn arb_split_row() -> impl Strategy<Value = SplitPayment> {
    (arb_tender(), arb_money()).prop_map(|(method, amount)| SplitPayment::new(method, amount, ""))
}

fn arb_method() -> impl Strategy<Value = PaymentMethod> {
    prop::sample::select(vec![
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
        PaymentMethod::MobileMoney,
        PaymentMethod::AccountBalance,
        PaymentMethod::Split,
    ])
}

fn arb_policy() -> impl Strategy<Value = ChangePolicy> {
    prop::sample::select(vec![
        ChangePolicy::ReturnToPayer,
        ChangePolicy::CreditToAccount,
        ChangePolicy::Donate,
    ])
}

fn arb_draft() -> impl Strategy<Value = OrderDraft> {
    (
        prop::collection::vec(arb_item(), 0..6),
        arb_tax_rate(),
        arb_money(),
        arb_method(),
        prop::collection::vec(arb_split_row(), 0..4),
        arb_money(),
        any::<bool>(),
        arb_policy(),
    )
        .prop_map(
            |(items, rate, discount, method, rows, tendered, carry, policy)| {
                OrderDraft::new(items, method)
                    .with_tax_rate(rate)
                    .with_discount(discount)
                    .with_split_payments(rows)
                    .with_amount_tendered(tendered)
                    .with_carry_balance(carry)
                    .with_change_policy(policy)
            },
        )
}

// =============================================================================
// Invariant Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Change due and outstanding balance are never negative.
    #[test]
    fn change_and_balance_never_negative(draft in arb_draft()) {
        let result = reconcile(&draft);
        prop_assert!(!result.change_due.is_negative());
        prop_assert!(!result.outstanding_balance.is_negative());
    }

    /// An order never both owes change and has a balance.
    #[test]
    fn change_and_balance_are_exclusive(draft in arb_draft()) {
        let result = reconcile(&draft);
        prop_assert!(result.change_due.is_zero() || result.outstanding_balance.is_zero());
    }

    /// Clamping keeps the total at or above zero whatever the discount or rate.
    #[test]
    fn total_never_negative(draft in arb_draft()) {
        let result = reconcile(&draft);
        prop_assert!(!result.total.is_negative());
        prop_assert!(!result.tax_amount.is_negative());
        prop_assert!(result.applied_discount <= result.subtotal + result.tax_amount);
    }

    /// outstanding − change is exactly total − tendered.
    #[test]
    fn balance_and_change_account_for_tender(draft in arb_draft()) {
        let result = reconcile(&draft);
        prop_assert_eq!(
            result.outstanding_balance - result.change_due,
            result.total - result.amount_tendered
        );
    }

    /// For splits, the tender used is the sum of the non-negative rows.
    #[test]
    fn split_total_is_conserved(
        items in prop::collection::vec(arb_item(), 1..4),
        rows in prop::collection::vec(arb_split_row(), 1..5),
        tendered in arb_money(),
    ) {
        let expected: Money = rows.iter().map(|r| r.amount.non_negative()).sum();
        let draft = OrderDraft::new(items, PaymentMethod::Split)
            .with_split_payments(rows)
            .with_amount_tendered(tendered);
        let result = reconcile(&draft);

        prop_assert_eq!(result.split_total, expected);
        prop_assert_eq!(result.amount_tendered, expected);
    }

    /// A split mismatch is reported exactly when the stated tender is more
    /// than one cent away from the split total.
    #[test]
    fn split_mismatch_iff_outside_tolerance(
        items in prop::collection::vec(arb_item(), 1..4),
        cents in prop::collection::vec(0i64..50_000, 1..5),
        offset in -300i64..=300,
    ) {
        let rows: Vec<SplitPayment> = cents
            .iter()
            .map(|&c| SplitPayment::new(TenderMethod::Card, Money::from_cents(c), "AUTH"))
            .collect();
        let row_sum: Money = rows.iter().map(|r| r.amount).sum();
        let stated = row_sum + Money::new(Decimal::new(offset, 3));

        let draft = OrderDraft::new(items, PaymentMethod::Split)
            .with_split_payments(rows)
            .with_amount_tendered(stated);
        let result = reconcile(&draft);

        let gap = (stated - result.split_total).abs();
        prop_assert_eq!(
            result.has_failure(FailureCode::SplitMismatch),
            gap > Money::from_cents(1)
        );
    }

    /// Exactly one allocation bucket carries the change.
    #[test]
    fn change_goes_to_one_bucket(draft in arb_draft()) {
        let result = reconcile(&draft);
        let allocation = result.change_allocation;
        prop_assert_eq!(
            allocation.returned + allocation.credited + allocation.donated,
            result.change_due
        );
    }

    /// `valid` is exactly "no failures", and line totals follow the items.
    #[test]
    fn validity_matches_failures(draft in arb_draft()) {
        let result = reconcile(&draft);
        prop_assert_eq!(result.valid, result.failures.is_empty());
        prop_assert_eq!(result.line_totals.len(), draft.items.len());
    }

    /// Same draft, same result, same bytes.
    #[test]
    fn reconciliation_is_deterministic(draft in arb_draft()) {
        let first = reconcile(&draft);
        let second = reconcile(&draft.clone());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
