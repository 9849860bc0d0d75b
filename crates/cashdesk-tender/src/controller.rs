//! # Cash Payment Controller
//!
//! Orchestrates one payment attempt end-to-end.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          start                 confirm                                  │
//! │   Idle ─────────► Active ──────────────────► Done(Successful)           │
//! │                   │  ▲  │                          │                    │
//! │   text changed /  │  │  │ cancel / Escape /        │                    │
//! │   other key ──────┘  │  │ view closed              │                    │
//! │                      │  └─────────────────► Done(Cancelled)             │
//! │                      │                             │                    │
//! │                      └──────── start ──────────────┘                    │
//! │                                                                         │
//! │  Key release policy (Active only):                                      │
//! │    Escape → cancel, always                                              │
//! │    Enter  → confirm only while funds are sufficient, otherwise ignored  │
//! │    other  → re-validate the tendered field's full text                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input arriving while Idle or Done belongs to no session and is dropped.

use std::sync::Arc;

use cashdesk_core::{Key, Money, TenderOutcome};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::completion::Completion;
use crate::config::TenderConfig;
use crate::observer::{ObserverList, PaymentObserver, PaymentStatus};
use crate::session::{PaymentRecord, PaymentSession};
use crate::view::{TenderView, ViewEvent, ViewEvents};

/// Where the controller stands in the payment lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No session was ever started.
    Idle,
    /// A session is waiting for a terminating action.
    Active,
    /// The last session ended with this outcome.
    Done(TenderOutcome),
}

/// The cash payment tool.
///
/// Owns the view it drives and the session state of the current attempt.
/// All handlers run synchronously on the caller's thread; events are applied
/// one at a time in the order the view produced them.
pub struct CashPaymentController<V: TenderView> {
    view: V,
    config: TenderConfig,
    session: Option<PaymentSession>,
    observers: ObserverList,
    events: mpsc::UnboundedReceiver<ViewEvent>,
    completion: Option<oneshot::Sender<TenderOutcome>>,
}

impl<V: TenderView> CashPaymentController<V> {
    /// Creates the controller and registers its event handle with the view.
    pub fn new(mut view: V, config: TenderConfig) -> Self {
        let (handle, events) = ViewEvents::channel();
        view.register(handle);

        CashPaymentController {
            view,
            config,
            session: None,
            observers: ObserverList::new(),
            events,
            completion: None,
        }
    }

    pub fn register_observer(&mut self, observer: Arc<dyn PaymentObserver>) {
        self.observers.register(observer);
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &TenderConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        match &self.session {
            None => ControllerState::Idle,
            Some(session) if session.is_active() => ControllerState::Active,
            Some(session) => ControllerState::Done(session.outcome()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == ControllerState::Active
    }

    /// Whether the tendered amount currently covers the amount due.
    /// Always false outside an active session.
    pub fn sufficient_funds(&self) -> bool {
        self.session
            .as_ref()
            .map_or(false, |s| s.is_active() && s.sufficient_funds())
    }

    /// The current (or last) session, if any was started.
    pub fn session(&self) -> Option<&PaymentSession> {
        self.session.as_ref()
    }

    /// Snapshot of the current (or last) session.
    pub fn record(&self) -> Option<PaymentRecord> {
        self.session.as_ref().map(PaymentSession::record)
    }

    // =========================================================================
    // Session Lifecycle
    // =========================================================================

    /// Starts a payment for `amount_due` and shows the view.
    ///
    /// The returned [`Completion`] resolves once the session ends. Starting
    /// while another session is still active cancels that one first.
    pub fn start(&mut self, amount_due: Money) -> Completion {
        if self.is_active() {
            warn!("Payment restarted while active, cancelling previous session");
            self.on_cancel_requested();
        }

        let mut stale = 0usize;
        while self.events.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            debug!(stale, "Discarded view events queued before start");
        }

        let session = PaymentSession::new(amount_due);
        info!(
            session_id = %session.id(),
            amount_due = %amount_due,
            "Cash payment started"
        );
        self.session = Some(session);

        let (tx, completion) = Completion::pair();
        self.completion = Some(tx);

        self.show_initial_state(amount_due);
        self.view.show();

        completion
    }

    /// Starts a payment and applies view events until it ends.
    ///
    /// Does not return before the session reaches a terminal outcome. If
    /// every event handle is dropped while the session is active, the
    /// payment is cancelled.
    pub async fn run(&mut self, amount_due: Money) -> TenderOutcome {
        let completion = self.start(amount_due);

        while self.is_active() {
            match self.events.recv().await {
                Some(event) => self.dispatch(event),
                None => {
                    warn!("All view event handles dropped, cancelling payment");
                    self.on_cancel_requested();
                }
            }
        }

        completion.await
    }

    /// Applies every event already queued by the view, without waiting.
    /// Returns how many events were taken off the queue.
    pub fn drain_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    /// Routes a view event to its handler.
    pub fn dispatch(&mut self, event: ViewEvent) {
        debug!(?event, "View event");
        match event {
            ViewEvent::TenderedTextChanged(text) => self.on_tendered_input_changed(&text),
            ViewEvent::KeyReleased(key) => self.on_key_released(key),
            ViewEvent::ConfirmActivated => self.on_confirm_requested(),
            ViewEvent::CancelActivated | ViewEvent::Closed => self.on_cancel_requested(),
        }
    }

    /// Re-validates the tendered text and updates change and confirm state.
    pub fn on_tendered_input_changed(&mut self, text: &str) {
        let check = match self.session.as_mut() {
            Some(session) if session.is_active() => session.apply_tendered_text(text),
            _ => {
                debug!(text, "Tendered text ignored, no active payment");
                return;
            }
        };

        match check.change_due {
            Some(change) => self.view.show_change(&change.format(true)),
            None => self.view.show_error_marker(&self.config.display.error_marker),
        }
        self.show_sufficiency(check.sufficient_funds);
    }

    /// Applies the key release policy.
    pub fn on_key_released(&mut self, key: Key) {
        if !self.is_active() {
            debug!(?key, "Key release ignored, no active payment");
            return;
        }

        match key {
            Key::Escape => self.on_cancel_requested(),
            Key::Enter => {
                if self.sufficient_funds() {
                    self.on_confirm_requested();
                } else {
                    debug!("Enter ignored, insufficient funds");
                }
            }
            Key::Other => {
                let text = self.view.tendered_text();
                self.on_tendered_input_changed(&text);
            }
        }
    }

    /// Ends the payment successfully.
    ///
    /// Does not re-check sufficiency unless `strict_confirm` is configured;
    /// the view's disabled confirm control is the gate on this path.
    pub fn on_confirm_requested(&mut self) {
        if !self.is_active() {
            debug!("Confirm ignored, no active payment");
            return;
        }
        if self.config.behavior.strict_confirm && !self.sufficient_funds() {
            warn!("Confirm requested with insufficient funds, ignored (strict)");
            return;
        }
        self.finish(TenderOutcome::Successful);
    }

    /// Ends the payment without success.
    pub fn on_cancel_requested(&mut self) {
        if !self.is_active() {
            debug!("Cancel ignored, no active payment");
            return;
        }
        self.finish(TenderOutcome::Cancelled);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn finish(&mut self, outcome: TenderOutcome) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.finish(outcome) {
            return;
        }

        info!(
            session_id = %session.id(),
            amount_due = %session.amount_due(),
            tendered = session.tendered_text(),
            %outcome,
            "Cash payment finished"
        );

        self.view.hide();
        self.observers.notify_all(&*self);

        if let Some(tx) = self.completion.take() {
            // Nobody awaiting the completion is fine
            let _ = tx.send(outcome);
        }
    }

    fn show_initial_state(&mut self, amount_due: Money) {
        self.view.show_amount_due(&amount_due.format(false));
        self.view.clear_tendered_text();
        self.view.show_change(&amount_due.format(true));
        self.show_sufficiency(false);
    }

    fn show_sufficiency(&mut self, sufficient: bool) {
        self.view.set_confirm_enabled(sufficient);
        self.view.mark_tendered_field(sufficient);
        self.view.mark_change_field(sufficient);
    }
}

impl<V: TenderView> PaymentStatus for CashPaymentController<V> {
    fn is_successful(&self) -> bool {
        self.session
            .as_ref()
            .map_or(false, |s| s.outcome().is_successful())
    }

    fn outcome(&self) -> TenderOutcome {
        self.session
            .as_ref()
            .map_or(TenderOutcome::Pending, PaymentSession::outcome)
    }
}

impl<V: TenderView> CashPaymentController<V> {
    /// True iff the most recently ended session was successful. False before
    /// any session and while one is running.
    pub fn is_successful(&self) -> bool {
        PaymentStatus::is_successful(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingView;
    use std::sync::Mutex;

    #[derive(Default)]
    struct OutcomeLog {
        seen: Mutex<Vec<TenderOutcome>>,
    }

    impl PaymentObserver for OutcomeLog {
        fn notify(&self, payment: &dyn PaymentStatus) {
            self.seen.lock().unwrap().push(payment.outcome());
        }
    }

    fn controller() -> CashPaymentController<RecordingView> {
        CashPaymentController::new(RecordingView::new(), TenderConfig::default())
    }

    fn ten() -> Money {
        Money::from_cents(1000)
    }

    #[test]
    fn test_new_controller_is_idle() {
        let c = controller();
        assert_eq!(c.state(), ControllerState::Idle);
        assert!(!c.is_successful());
        assert!(c.view().events().is_some());
    }

    #[test]
    fn test_start_shows_initial_screen() {
        let mut c = controller();
        c.view_mut().type_text("leftover");

        let _completion = c.start(ten());

        let view = c.view();
        assert_eq!(view.amount_due_text(), "10.00");
        assert_eq!(view.change_text(), "+10.00");
        assert_eq!(view.tendered_text(), "");
        assert!(!view.is_confirm_enabled());
        assert!(!view.is_tendered_marked_valid());
        assert!(!view.is_change_marked_valid());
        assert!(view.is_visible());
        assert_eq!(c.state(), ControllerState::Active);
    }

    #[test]
    fn test_partial_then_sufficient_tender() {
        let mut c = controller();
        let _completion = c.start(ten());

        c.on_tendered_input_changed("5.00");
        assert_eq!(c.view().change_text(), "+5.00");
        assert!(!c.view().is_confirm_enabled());
        assert!(!c.sufficient_funds());

        c.on_tendered_input_changed("10.00");
        assert_eq!(c.view().change_text(), "0.00");
        assert!(c.view().is_confirm_enabled());
        assert!(c.view().is_tendered_marked_valid());
        assert!(c.view().is_change_marked_valid());

        c.on_tendered_input_changed("12,50");
        assert_eq!(c.view().change_text(), "-2.50");
        assert!(c.sufficient_funds());
    }

    #[test]
    fn test_invalid_text_overrides_prior_sufficiency() {
        let mut c = controller();
        let _completion = c.start(ten());

        c.on_tendered_input_changed("20");
        assert!(c.sufficient_funds());

        c.on_tendered_input_changed("20abc");
        assert!(!c.sufficient_funds());
        assert!(c.view().is_error_shown());
        assert_eq!(c.view().change_text(), " Err ");
        assert!(!c.view().is_confirm_enabled());
        assert!(!c.view().is_tendered_marked_valid());
    }

    #[test]
    fn test_custom_error_marker() {
        let mut config = TenderConfig::default();
        config.display.error_marker = "ERROR".to_string();
        let mut c = CashPaymentController::new(RecordingView::new(), config);
        let _completion = c.start(ten());

        c.on_tendered_input_changed("?");
        assert_eq!(c.view().change_text(), "ERROR");
    }

    #[test]
    fn test_extreme_amounts_due_never_panic() {
        let mut c = controller();
        let _completion = c.start(Money::from_cents(i64::MIN));
        c.on_tendered_input_changed("1");
        assert!(c.sufficient_funds());
        assert_eq!(c.view().change_text(), Money::from_cents(i64::MIN).format(true));

        let _completion = c.start(Money::from_cents(i64::MAX));
        c.on_tendered_input_changed("999999999.99");
        assert!(!c.sufficient_funds());
        assert!(c.view().change_text().starts_with('+'));

        c.on_key_released(Key::Enter);
        assert_eq!(c.state(), ControllerState::Active);
    }

    #[test]
    fn test_empty_text_is_zero() {
        let mut c = controller();
        let _completion = c.start(ten());

        c.on_tendered_input_changed("");
        assert_eq!(c.view().change_text(), "+10.00");
        assert!(!c.view().is_error_shown());
    }

    #[test]
    fn test_enter_with_insufficient_funds_is_ignored() {
        let mut c = controller();
        let _completion = c.start(ten());
        c.on_tendered_input_changed("9.99");

        c.on_key_released(Key::Enter);

        assert_eq!(c.state(), ControllerState::Active);
        assert!(c.view().is_visible());
        assert_eq!(c.view().change_text(), "+0.01");
    }

    #[test]
    fn test_enter_with_sufficient_funds_confirms() {
        let mut c = controller();
        let mut completion = c.start(ten());
        c.on_tendered_input_changed("10");

        c.on_key_released(Key::Enter);

        assert_eq!(c.state(), ControllerState::Done(TenderOutcome::Successful));
        assert!(c.is_successful());
        assert!(!c.view().is_visible());
        assert_eq!(completion.try_outcome(), Some(TenderOutcome::Successful));
    }

    #[test]
    fn test_escape_cancels_unconditionally() {
        let mut c = controller();
        let mut completion = c.start(ten());
        c.on_tendered_input_changed("50");

        c.on_key_released(Key::Escape);

        assert_eq!(c.state(), ControllerState::Done(TenderOutcome::Cancelled));
        assert!(!c.is_successful());
        assert_eq!(completion.try_outcome(), Some(TenderOutcome::Cancelled));
    }

    #[test]
    fn test_other_key_revalidates_field_text() {
        let mut c = controller();
        let _completion = c.start(ten());

        c.view_mut().type_text("1");
        c.on_key_released(Key::Other);
        assert_eq!(c.view().change_text(), "+9.00");

        c.view_mut().type_text("15");
        c.on_key_released(Key::Other);
        assert_eq!(c.view().change_text(), "-5.00");
        assert!(c.view().is_confirm_enabled());
        assert_eq!(c.session().unwrap().tendered_text(), "15");
    }

    #[test]
    fn test_confirm_control_bypasses_sufficiency() {
        let mut c = controller();
        let _completion = c.start(ten());
        c.on_tendered_input_changed("1");

        c.on_confirm_requested();

        assert!(c.is_successful());
    }

    #[test]
    fn test_strict_confirm_requires_sufficiency() {
        let mut config = TenderConfig::default();
        config.behavior.strict_confirm = true;
        let mut c = CashPaymentController::new(RecordingView::new(), config);
        let _completion = c.start(ten());
        c.on_tendered_input_changed("1");

        c.on_confirm_requested();
        assert_eq!(c.state(), ControllerState::Active);

        c.on_tendered_input_changed("10");
        c.on_confirm_requested();
        assert!(c.is_successful());
    }

    #[test]
    fn test_observers_notified_once_per_termination() {
        let log = Arc::new(OutcomeLog::default());
        let mut c = controller();
        c.register_observer(log.clone());

        let _first = c.start(ten());
        c.on_tendered_input_changed("10");
        c.on_confirm_requested();
        // Stale terminating input must not notify again
        c.on_cancel_requested();
        c.on_key_released(Key::Escape);

        let _second = c.start(ten());
        c.dispatch(ViewEvent::Closed);

        assert_eq!(
            *log.seen.lock().unwrap(),
            vec![TenderOutcome::Successful, TenderOutcome::Cancelled]
        );
    }

    #[test]
    fn test_input_after_done_is_ignored() {
        let mut c = controller();
        let _completion = c.start(ten());
        c.on_key_released(Key::Escape);
        let change_before = c.view().change_text().to_string();

        c.on_tendered_input_changed("100");

        assert_eq!(c.view().change_text(), change_before);
        assert_eq!(c.state(), ControllerState::Done(TenderOutcome::Cancelled));
    }

    #[test]
    fn test_input_while_idle_is_ignored() {
        let mut c = controller();
        c.on_tendered_input_changed("5");
        c.on_key_released(Key::Enter);
        c.on_confirm_requested();
        assert_eq!(c.state(), ControllerState::Idle);
        assert_eq!(c.view().show_count(), 0);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut c = controller();
        let _first = c.start(ten());
        c.on_tendered_input_changed("10");
        c.on_key_released(Key::Enter);
        assert!(c.is_successful());

        let _second = c.start(Money::from_cents(2000));

        assert_eq!(c.state(), ControllerState::Active);
        assert!(!c.is_successful());
        assert!(!c.sufficient_funds());
        assert_eq!(PaymentStatus::outcome(&c), TenderOutcome::Pending);
        assert_eq!(c.view().change_text(), "+20.00");
        assert!(!c.view().is_confirm_enabled());
    }

    #[test]
    fn test_start_while_active_cancels_previous() {
        let log = Arc::new(OutcomeLog::default());
        let mut c = controller();
        c.register_observer(log.clone());

        let mut first = c.start(ten());
        let _second = c.start(ten());

        assert_eq!(first.try_outcome(), Some(TenderOutcome::Cancelled));
        assert_eq!(*log.seen.lock().unwrap(), vec![TenderOutcome::Cancelled]);
        assert_eq!(c.state(), ControllerState::Active);
    }

    #[test]
    fn test_start_discards_queued_events() {
        let mut c = controller();
        let events = c.view().events().unwrap().clone();
        events.confirm_activated();

        let _completion = c.start(ten());

        assert_eq!(c.drain_events(), 0);
        assert_eq!(c.state(), ControllerState::Active);
    }

    #[test]
    fn test_drain_events_applies_in_order() {
        let mut c = controller();
        let _completion = c.start(ten());
        let events = c.view().events().unwrap().clone();

        events.tendered_text_changed("3");
        events.key_released(Key::Enter);
        events.tendered_text_changed("30");
        events.key_released(Key::Enter);

        assert_eq!(c.drain_events(), 4);
        assert!(c.is_successful());
    }

    #[test]
    fn test_record_after_completion() {
        let mut c = controller();
        let _completion = c.start(ten());
        c.on_tendered_input_changed("20");
        c.on_key_released(Key::Enter);

        let record = c.record().unwrap();
        assert_eq!(record.amount_due, ten());
        assert_eq!(record.tendered_text, "20");
        assert_eq!(record.outcome, TenderOutcome::Successful);
    }

    #[tokio::test]
    async fn test_run_returns_after_terminating_event() {
        let mut c = controller();
        let events = c.view().events().unwrap().clone();

        // Runs once `run` has started the session and is waiting for input
        tokio::spawn(async move {
            events.tendered_text_changed("abc");
            events.key_released(Key::Enter);
            events.tendered_text_changed("10");
            events.key_released(Key::Enter);
        });

        assert_eq!(c.run(ten()).await, TenderOutcome::Successful);
        assert!(c.is_successful());
    }

    #[tokio::test]
    async fn test_run_cancels_when_view_detaches() {
        let mut c = controller();
        c.view_mut().detach();

        assert_eq!(c.run(ten()).await, TenderOutcome::Cancelled);
        assert!(!c.view().is_visible());
    }
}
