//! # cashdesk-core: Pure Business Logic for the Cash Desk
//!
//! Value types and rules shared by the tender controller and its shells.
//! Nothing in here touches a terminal, a file or a clock.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cashdesk Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (TerminalView, ...)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ViewEvent / display commands           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               cashdesk-tender (CashPaymentController)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cashdesk-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                   │   │
//! │  │   │   money   │  │   types   │  │ validation│                   │   │
//! │  │   │   Money   │  │  Outcome  │  │  amount   │                   │   │
//! │  │   │           │  │    Key    │  │   text    │                   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Tender outcome and key classification
//! - [`error`] - Domain error types
//! - [`validation`] - Amount text rules
//!
//! ## Example Usage
//!
//! ```rust
//! use cashdesk_core::Money;
//!
//! let due = Money::create("10.00").unwrap();
//! let tendered = Money::create("12,50").unwrap();
//!
//! let change = due.subtract(tendered);
//! assert!(change.is_less_or_equal_zero());
//! assert_eq!(change.format(true), "-2.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Marker shown in place of the change amount while the tendered text is
/// not a valid amount.
pub const ERROR_MARKER: &str = " Err ";

/// Maximum digits accepted before the decimal separator.
///
/// Nine digits keeps every parsed amount far away from `i64` overflow,
/// even after subtracting it from another parsed amount.
pub const MAX_AMOUNT_DIGITS: usize = 9;
