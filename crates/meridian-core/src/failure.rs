//! # Failures
//!
//! A broken business rule found while reconciling a draft. Failures are data,
//! not errors: the engine collects all of them in one pass so a form can show
//! every problem inline at once.
//!
//! ```json
//! { "field": "items[0].quantity", "code": "invalid_item", "message": "quantity must be at least 1" }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

/// Machine-readable failure codes.
///
/// ## Usage in Frontend
/// ```typescript
/// for (const f of result.failures) {
///   if (f.code === 'insufficient_payment') highlightTenderBox();
///   showInline(f.field, f.message);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    /// The draft has no line items.
    EmptyOrder,
    /// A line item's quantity, price or description is unusable.
    InvalidItem,
    /// Tax rate outside `[0, 100]`.
    OutOfRange,
    /// Discount larger than subtotal + tax.
    DiscountExceedsTotal,
    /// A monetary input is negative.
    InvalidAmount,
    /// Split rows were sent with a non-split payment method.
    UnexpectedSplit,
    /// Split payment method with no rows.
    EmptySplit,
    /// Split rows do not add up to the stated amount tendered.
    SplitMismatch,
    /// A balance remains and the payer may not carry one.
    InsufficientPayment,
}

impl FailureCode {
    /// Wire name of the code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FailureCode::EmptyOrder => "empty_order",
            FailureCode::InvalidItem => "invalid_item",
            FailureCode::OutOfRange => "out_of_range",
            FailureCode::DiscountExceedsTotal => "discount_exceeds_total",
            FailureCode::InvalidAmount => "invalid_amount",
            FailureCode::UnexpectedSplit => "unexpected_split",
            FailureCode::EmptySplit => "empty_split",
            FailureCode::SplitMismatch => "split_mismatch",
            FailureCode::InsufficientPayment => "insufficient_payment",
        }
    }
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated rule, anchored to the input field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Failure {
    /// Path of the offending input, in wire naming (`items[2].unitPrice`).
    pub field: String,
    pub code: FailureCode,
    /// Human-readable explanation, safe to show next to the field.
    pub message: String,
}

impl Failure {
    pub fn new(field: impl Into<String>, code: FailureCode, message: impl Into<String>) -> Self {
        Failure {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// Builds a failure whose message comes from a field validator.
    pub fn from_validation(
        field: impl Into<String>,
        code: FailureCode,
        err: &ValidationError,
    ) -> Self {
        Failure::new(field, code, err.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.field, self.message, self.code)
    }
}

// =============================================================================
// Field Paths
// =============================================================================

/// Field path of a line item attribute, e.g. `items[0].quantity`.
pub(crate) fn item_field(index: usize, attribute: &str) -> String {
    format!("items[{index}].{attribute}")
}

/// Field path of a split row attribute, e.g. `splitPayments[1].amount`.
pub(crate) fn split_field(index: usize, attribute: &str) -> String {
    format!("splitPayments[{index}].{attribute}")
}
