//! # Validation Module
//!
//! Field-level validation helpers for Meridian.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form (TypeScript)                                  │
//! │  ├── Input masks, "is this a number"                                   │
//! │  └── Renders the failures returned by the engine                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Type validation → CoreError::InvalidArgument                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE + engine                                         │
//! │  ├── Per-field rules (quantity ≥ 1, price ≥ 0, email shape, ...)       │
//! │  └── The engine collects every broken rule as a Failure                │
//! │                                                                         │
//! │  The server re-checks on submission; the forms never duplicate rules.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use meridian_core::validation::{validate_description, validate_quantity};
//!
//! assert!(validate_description("Monthly membership").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::TaxRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted line item description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Longest accepted split payment reference.
pub const MAX_REFERENCE_LEN: usize = 100;

// =============================================================================
// Line Item Validators
// =============================================================================

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 200 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity value.
///
/// ## Rules
/// - Must be a positive whole number (≥ 1)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Payment form: line item row                                            │
/// │                                                                         │
/// │  Staff enters quantity: 0                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(0) ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── qty <= 0? → "quantity must be at least 1"                     │
/// │       │                                                                 │
/// │       └── OK → line counts toward the subtotal                          │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (complimentary items)
///
/// ## Example
/// ```rust
/// use meridian_core::money::Money;
/// use meridian_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_cents(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    validate_non_negative("unit price", price)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that an amount is not negative.
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0% and 100% inclusive
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    if !rate.is_in_range() {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: TaxRate::MIN.to_string(),
            max: TaxRate::MAX.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Payer Validators
// =============================================================================

/// Validates a first or last name.
///
/// ## Rules
/// - Must not be empty
/// - At most 100 characters
pub fn validate_person_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 100,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// This is a shape check, not RFC 5322: one `@`, a non-empty local part, and
/// a domain containing a dot that is neither first nor last.
///
/// ## Example
/// ```rust
/// use meridian_core::validation::validate_email;
///
/// assert!(validate_email("amara@example.com").is_ok());
/// assert!(validate_email("amara@localhost").is_err());
/// assert!(validate_email("not an email").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must have exactly one @ after a name"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Only digits, spaces, `+`, `-`, `(`, `)`
/// - 7 to 15 digits
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, +, -, and parentheses".to_string(),
        });
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 7 and 15 digits".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Submission Validators
// =============================================================================

/// Validates a customer identifier from the customer directory.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, numbers, hyphens, underscores only
pub fn validate_customer_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "customer id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "customer id".to_string(),
            max: 64,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "customer id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a split payment reference (card auth code, transfer id, ...).
///
/// Empty is allowed; cash rows usually have none.
pub fn validate_reference(reference: &str) -> ValidationResult<()> {
    if reference.chars().count() > MAX_REFERENCE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_REFERENCE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Yoga class").is_ok());
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10_000).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::new(dec!(10.99))).is_ok());
        assert!(validate_unit_price(Money::new(dec!(-0.01))).is_err());
    }

    #[test]
    fn test_validate_tax_rate() {
        assert!(validate_tax_rate(TaxRate::from_percent(dec!(0))).is_ok());
        assert!(validate_tax_rate(TaxRate::from_percent(dec!(8.25))).is_ok());
        assert!(validate_tax_rate(TaxRate::from_percent(dec!(100))).is_ok());

        let err = validate_tax_rate(TaxRate::from_percent(dec!(120))).unwrap_err();
        assert_eq!(err.to_string(), "tax rate must be between 0% and 100%");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("front.desk@spa.example.org").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
        assert!(validate_email("a@example.").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1 (555) 010-2030").is_ok());
        assert!(validate_phone("0712345678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
    }

    #[test]
    fn test_validate_customer_id() {
        assert!(validate_customer_id("cus_0042").is_ok());
        assert!(validate_customer_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_customer_id("").is_err());
        assert!(validate_customer_id("has space").is_err());
    }

    #[test]
    fn test_validate_reference() {
        assert!(validate_reference("").is_ok());
        assert!(validate_reference("AUTH-99120").is_ok());
        assert!(validate_reference(&"R".repeat(101)).is_err());
    }
}
