//! # Payment Session
//!
//! State of one payment attempt, from `start` to a terminal outcome.
//!
//! ## Derived Fields
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tendered_text ──► normalize ("" → "0") ──► Money::create               │
//! │                                                  │                      │
//! │                          ┌───────────────────────┴────────┐             │
//! │                          ▼ Ok(tendered)                   ▼ Err         │
//! │             change_due = due - tendered          change_due = None      │
//! │             sufficient = change_due <= 0         sufficient = false     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both derived fields are recomputed on every text change and never carried
//! over into another session.

use cashdesk_core::validation::normalize_tendered_text;
use cashdesk_core::{Money, TenderOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of re-validating the tendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenderCheck {
    /// Change still owed (positive) or to hand back (negative).
    /// `None` when the tendered text is not a valid amount.
    pub change_due: Option<Money>,
    pub sufficient_funds: bool,
}

/// One payment attempt.
#[derive(Debug, Clone)]
pub struct PaymentSession {
    id: Uuid,
    amount_due: Money,
    tendered_text: String,
    change_due: Option<Money>,
    sufficient_funds: bool,
    outcome: TenderOutcome,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl PaymentSession {
    /// Opens a session. Nothing is tendered yet, so the full amount is owed.
    pub fn new(amount_due: Money) -> Self {
        PaymentSession {
            id: Uuid::new_v4(),
            amount_due,
            tendered_text: String::new(),
            change_due: Some(amount_due),
            sufficient_funds: false,
            outcome: TenderOutcome::Pending,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn amount_due(&self) -> Money {
        self.amount_due
    }

    pub fn tendered_text(&self) -> &str {
        &self.tendered_text
    }

    pub fn change_due(&self) -> Option<Money> {
        self.change_due
    }

    pub fn sufficient_funds(&self) -> bool {
        self.sufficient_funds
    }

    pub fn outcome(&self) -> TenderOutcome {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Stores new tendered text and recomputes the derived fields.
    pub fn apply_tendered_text(&mut self, text: &str) -> TenderCheck {
        self.tendered_text = text.to_string();

        match Money::create(normalize_tendered_text(text)) {
            Ok(tendered) => {
                let change = self.amount_due.subtract(tendered);
                self.change_due = Some(change);
                self.sufficient_funds = change.is_less_or_equal_zero();
            }
            Err(_) => {
                self.change_due = None;
                self.sufficient_funds = false;
            }
        }

        self.check()
    }

    pub fn check(&self) -> TenderCheck {
        TenderCheck {
            change_due: self.change_due,
            sufficient_funds: self.sufficient_funds,
        }
    }

    /// Moves the session to a terminal outcome.
    ///
    /// Returns false (and changes nothing) if the session already ended or
    /// `outcome` is `Pending`.
    pub fn finish(&mut self, outcome: TenderOutcome) -> bool {
        if self.outcome.is_terminal() || !outcome.is_terminal() {
            return false;
        }
        self.outcome = outcome;
        self.finished_at = Some(Utc::now());
        true
    }

    pub fn record(&self) -> PaymentRecord {
        PaymentRecord {
            session_id: self.id,
            amount_due: self.amount_due,
            tendered_text: self.tendered_text.clone(),
            change_due: self.change_due,
            sufficient_funds: self.sufficient_funds,
            outcome: self.outcome,
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}

/// Snapshot of a session, for logs and shells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub session_id: Uuid,
    pub amount_due: Money,
    pub tendered_text: String,
    pub change_due: Option<Money>,
    pub sufficient_funds: bool,
    pub outcome: TenderOutcome,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
