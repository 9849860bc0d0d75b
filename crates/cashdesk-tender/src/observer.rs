//! # Payment Observers
//!
//! Collaborators that want to hear when a payment ends. They receive no
//! payload of their own; they query the outcome through [`PaymentStatus`].

use std::sync::Arc;

use cashdesk_core::TenderOutcome;

/// Read access to the outcome of the most recent payment.
pub trait PaymentStatus {
    /// True iff the most recently ended session was successful.
    fn is_successful(&self) -> bool;

    /// Outcome of the current session (`Pending` while it runs or before
    /// any session started).
    fn outcome(&self) -> TenderOutcome;
}

/// Notified once per session termination.
pub trait PaymentObserver: Send + Sync {
    fn notify(&self, payment: &dyn PaymentStatus);
}

/// Observers in registration order.
#[derive(Default)]
pub struct ObserverList {
    observers: Vec<Arc<dyn PaymentObserver>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, observer: Arc<dyn PaymentObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify_all(&self, payment: &dyn PaymentStatus) {
        for observer in &self.observers {
            observer.notify(payment);
        }
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("len", &self.observers.len())
            .finish()
    }
}
