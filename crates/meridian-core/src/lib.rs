//! # meridian-core: Pure Payment Reconciliation
//!
//! This crate is the **heart** of Meridian payment entry. It turns an order
//! draft into a financial breakdown and a list of broken rules, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Meridian Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Admin Dashboard (browser)                       │   │
//! │  │   Gym · Spa · Manufacturing · Childcare · Marketing forms       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ OrderDraft (JSON / TS bindings)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ meridian-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  engine   │  │ validation│  │   │
//! │  │   │ OrderDraft│  │   Money   │  │ reconcile │  │   rules   │  │   │
//! │  │   │ LineItem  │  │  TaxCalc  │  │  Result   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ReconciliationResult                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   Callers: dashboard forms, meridian-recon batch CLI, tests     │   │
//! │  │   They own customer lookup, persistence and display.            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Draft types (OrderDraft, LineItem, SplitPayment, etc.)
//! - [`money`] - Money type with exact decimal arithmetic (no floating point!)
//! - [`engine`] - The reconciliation engine and its result
//! - [`failure`] - Failure codes reported by the engine
//! - [`validation`] - Field-level rules
//! - [`payer`] - Customer directory record → balance permission
//! - [`submission`] - Payload for the payment submission endpoint
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same draft in, same result out
//! 2. **No I/O**: database, network, file system, logging are FORBIDDEN here
//! 3. **Decimal Money**: exact base-10 amounts, rounded half-up to the cent
//! 4. **Failures are data**: business rule violations never become `Err`
//!
//! ## Example Usage
//!
//! ```rust
//! use meridian_core::{reconcile, LineItem, Money, OrderDraft, PaymentMethod, TaxRate};
//! use rust_decimal_macros::dec;
//!
//! let draft = OrderDraft::new(
//!     vec![LineItem::new("Day pass", 2, Money::new(dec!(10)))],
//!     PaymentMethod::Cash,
//! )
//! .with_tax_rate(TaxRate::from_percent(dec!(15)))
//! .with_amount_tendered(Money::new(dec!(20)));
//!
//! let result = reconcile(&draft);
//! assert_eq!(result.total.to_string(), "$23.00");
//! assert_eq!(result.outstanding_balance.to_string(), "$3.00");
//! assert!(!result.valid); // non-members must pay in full
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod failure;
pub mod money;
pub mod payer;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use meridian_core::Money` instead of
// `use meridian_core::money::Money`

pub use engine::{
    parse_draft, reconcile, reconcile_json, ChangeAllocation, EngineConfig,
    ReconciliationEngine, ReconciliationResult, DEFAULT_SPLIT_TOLERANCE,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use failure::{Failure, FailureCode};
pub use money::Money;
pub use payer::PayerProfile;
pub use submission::PaymentSubmission;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Decimal places of every rounded amount (tax, total, change, balance).
pub const MONEY_DECIMAL_PLACES: u32 = 2;
