//! # Payer Profile
//!
//! The slice of a customer directory record that matters for payment entry.
//! The engine never looks customers up; callers fetch the record, wrap it in
//! a [`PayerProfile`], and copy [`PayerProfile::can_carry_balance`] into the
//! draft.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::OrderDraft;
use crate::validation::{validate_email, validate_person_name, validate_phone, ValidationResult};

/// A customer as returned by the directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PayerProfile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Members may leave an order partially unpaid.
    #[serde(default)]
    pub is_member: bool,
}

impl PayerProfile {
    /// Only members may carry a balance.
    #[inline]
    pub fn can_carry_balance(&self) -> bool {
        self.is_member
    }

    /// "First Last", trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Copies this payer's balance permission into `draft`.
    ///
    /// ```rust
    /// use meridian_core::payer::PayerProfile;
    /// use meridian_core::types::{OrderDraft, PaymentMethod};
    ///
    /// let member = PayerProfile {
    ///     first_name: "Amara".into(),
    ///     last_name: "Okafor".into(),
    ///     email: None,
    ///     phone: None,
    ///     is_member: true,
    /// };
    /// let draft = member.apply_to(OrderDraft::new(vec![], PaymentMethod::AccountBalance));
    /// assert!(draft.payer_can_carry_balance);
    /// ```
    pub fn apply_to(&self, draft: OrderDraft) -> OrderDraft {
        draft.with_carry_balance(self.can_carry_balance())
    }

    /// Validates names and, when present, email and phone.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_person_name("first name", &self.first_name)?;
        validate_person_name("last name", &self.last_name)?;

        if let Some(email) = &self.email {
            validate_email(email)?;
        }

        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }

        Ok(())
    }
}
