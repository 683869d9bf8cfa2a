//! # Error Types
//!
//! Domain-specific error types for meridian-core.
//!
//! ## Errors vs Failures
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Two Kinds of "Something Is Wrong"                     │
//! │                                                                         │
//! │  Failure (failure.rs)       - invalid BUSINESS DATA                     │
//! │  ├── quantity 0, discount too large, payment short, ...                 │
//! │  └── returned inside ReconciliationResult, never as Err                 │
//! │                                                                         │
//! │  CoreError (this file)      - MALFORMED CALL or refused operation       │
//! │  ├── InvalidArgument  - input is not an OrderDraft at all               │
//! │  ├── NotSubmittable   - tried to submit a result with failures          │
//! │  └── Validation       - a payer/submission field is malformed           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code / stderr      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, counts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core errors.
///
/// None of these are produced by [`crate::reconcile`] itself; reconciling a
/// well-typed draft always succeeds.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller did not pass a usable order draft.
    ///
    /// ## When This Occurs
    /// - JSON input is `null`, not an object, or not JSON at all
    /// - `items` is missing or is not an array
    /// - A numeric field holds text that is not a number
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A result with failures cannot be turned into a payment submission.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Record payment"
    ///      │
    ///      ▼
    /// reconcile(draft) → valid = false, 2 failures
    ///      │
    ///      ▼
    /// PaymentSubmission::from_result → NotSubmittable { failures: 2 }
    ///      │
    ///      ▼
    /// Submit button stays disabled, inline errors shown
    /// ```
    #[error("Reconciliation has {failures} failure(s) and cannot be submitted")]
    NotSubmittable { failures: usize },

    /// Engine configuration is unusable.
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Raised by the helpers in [`crate::validation`]. The engine turns the ones
/// it hits into `Failure` entries; the payer and submission helpers return
/// them directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be positive.
    #[error("{field} must be at least 1")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid email, invalid phone).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NotSubmittable { failures: 2 };
        assert_eq!(
            err.to_string(),
            "Reconciliation has 2 failure(s) and cannot be submitted"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be at least 1");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
