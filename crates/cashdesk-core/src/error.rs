//! # Error Types
//!
//! Domain-specific error types for cashdesk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cashdesk-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  cashdesk-tender errors (separate crate)                                │
//! │  └── TenderError      - Configuration loading failures                  │
//! │                                                                         │
//! │  The payment controller never returns these: malformed tendered text    │
//! │  is absorbed into the error marker display.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Amount due for a payment is not a chargeable amount.
    ///
    /// ## When This Occurs
    /// - A shell asks to collect zero or a negative amount
    #[error("Invalid amount due: {amount} (must be greater than zero)")]
    InvalidAmountDue { amount: Money },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} digits")]
    TooLong { field: String, max: usize },

    /// Invalid format (letters, signs, too many decimals, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
