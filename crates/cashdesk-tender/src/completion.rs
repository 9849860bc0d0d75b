//! # Completion Signal
//!
//! `start` hands back a [`Completion`]: a future that resolves exactly once,
//! when the session reaches a terminal outcome.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use cashdesk_core::TenderOutcome;
use tokio::sync::oneshot;

/// Resolves with the terminal outcome of one payment session.
///
/// If the controller goes away before the session ends, the completion
/// resolves `Cancelled`: an abandoned payment never stays undecided.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<TenderOutcome>,
}

impl Completion {
    pub(crate) fn pair() -> (oneshot::Sender<TenderOutcome>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Completion { rx })
    }

    /// Non-blocking check. `None` while the session is still running.
    pub fn try_outcome(&mut self) -> Option<TenderOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(TenderOutcome::Cancelled),
        }
    }
}

impl Future for Completion {
    type Output = TenderOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(TenderOutcome::Cancelled))
    }
}
