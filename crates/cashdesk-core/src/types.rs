//! # Domain Types
//!
//! Small enums shared between the tender controller and its views.

use serde::{Deserialize, Serialize};

// =============================================================================
// Tender Outcome
// =============================================================================

/// How a payment session ended.
///
/// ```text
///            start
///   Pending ───────► Successful   (confirm)
///      │
///      └───────────► Cancelled    (cancel, Escape, window closed)
/// ```
///
/// A session leaves `Pending` exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenderOutcome {
    /// Session is running, no terminating action yet.
    Pending,
    /// Cash was received and the sale may proceed.
    Successful,
    /// Payment was abandoned.
    Cancelled,
}

impl TenderOutcome {
    /// Returns true once the session has ended, either way.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, TenderOutcome::Pending)
    }

    #[inline]
    pub const fn is_successful(&self) -> bool {
        matches!(self, TenderOutcome::Successful)
    }
}

impl Default for TenderOutcome {
    fn default() -> Self {
        TenderOutcome::Pending
    }
}

impl std::fmt::Display for TenderOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenderOutcome::Pending => write!(f, "pending"),
            TenderOutcome::Successful => write!(f, "successful"),
            TenderOutcome::Cancelled => write!(f, "cancelled"),
        }
    }
}

// =============================================================================
// Key
// =============================================================================

/// A released key, as classified by the view.
///
/// Only Escape and Enter carry meaning; everything else re-runs validation
/// of the tendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Other,
}
