//! # Payment Submission
//!
//! Builds the payload for the payment submission endpoint from a reconciled
//! draft. Sending it is the caller's job; this module only refuses to build a
//! payload from a result that still has failures.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderDraft ──► reconcile() ──► ReconciliationResult                    │
//! │                                        │                                │
//! │                     valid = false ◄────┼────► valid = true              │
//! │                          │             │            │                   │
//! │                          ▼             │            ▼                   │
//! │                 NotSubmittable         │    PaymentSubmission           │
//! │                 (show failures)        │    (caller POSTs it)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Amounts are copied out of the result at build time, so later edits to the
//! form cannot change what was submitted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::engine::{ChangeAllocation, ReconciliationResult};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{BusinessUnit, OrderDraft, PaymentMethod, SplitPayment};
use crate::validation::{validate_customer_id, validate_reference};

/// A finalized payment, ready for the submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    /// Unique identifier (UUID v4), used as the idempotency key.
    pub id: String,
    pub customer_id: String,
    pub business_unit: BusinessUnit,
    pub payment_method: PaymentMethod,
    pub subtotal: Money,
    pub tax_amount: Money,
    pub discount_amount: Money,
    pub total: Money,
    pub amount_tendered: Money,
    pub change_due: Money,
    pub outstanding_balance: Money,
    pub change_allocation: ChangeAllocation,
    /// Split rows as entered; empty unless the method is split.
    pub split_payments: Vec<SplitPayment>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl PaymentSubmission {
    /// Snapshots `result` (the reconciliation of `draft`) into a submission.
    ///
    /// ## Errors
    /// - [`CoreError::NotSubmittable`] if the result has failures
    /// - [`CoreError::Validation`] if `customer_id` or a split reference is malformed
    pub fn from_result(
        draft: &OrderDraft,
        result: &ReconciliationResult,
        customer_id: &str,
        business_unit: BusinessUnit,
    ) -> CoreResult<Self> {
        if !result.valid {
            return Err(CoreError::NotSubmittable {
                failures: result.failures.len(),
            });
        }

        validate_customer_id(customer_id)?;

        let split_payments = if draft.payment_method.is_split() {
            for row in &draft.split_payments {
                validate_reference(&row.reference)?;
            }
            draft.split_payments.clone()
        } else {
            Vec::new()
        };

        Ok(PaymentSubmission {
            id: Uuid::new_v4().to_string(),
            customer_id: customer_id.trim().to_string(),
            business_unit,
            payment_method: draft.payment_method,
            subtotal: result.subtotal,
            tax_amount: result.tax_amount,
            discount_amount: result.applied_discount,
            total: result.total,
            amount_tendered: result.amount_tendered,
            change_due: result.change_due,
            outstanding_balance: result.outstanding_balance,
            change_allocation: result.change_allocation,
            split_payments,
            created_at: Utc::now(),
        })
    }

    /// True when the payer left part of the total on account.
    pub fn carries_balance(&self) -> bool {
        self.outstanding_balance.is_positive()
    }
}
