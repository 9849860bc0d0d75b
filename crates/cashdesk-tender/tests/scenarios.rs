//! End-to-end cash payment scenarios driven through the public API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cashdesk_core::{Key, Money, TenderOutcome};
use cashdesk_tender::{
    CashPaymentController, ControllerState, PaymentObserver, PaymentStatus, RecordingView,
    TenderConfig, ViewEvent,
};

#[derive(Default)]
struct CountingObserver {
    notified: AtomicUsize,
    successes: Mutex<Vec<bool>>,
}

impl PaymentObserver for CountingObserver {
    fn notify(&self, payment: &dyn PaymentStatus) {
        self.notified.fetch_add(1, Ordering::SeqCst);
        self.successes.lock().unwrap().push(payment.is_successful());
    }
}

fn controller_with_observer() -> (CashPaymentController<RecordingView>, Arc<CountingObserver>) {
    let observer = Arc::new(CountingObserver::default());
    let mut controller = CashPaymentController::new(RecordingView::new(), TenderConfig::default());
    controller.register_observer(observer.clone());
    (controller, observer)
}

#[test]
fn test_exact_payment_confirmed_with_enter() {
    let (mut controller, observer) = controller_with_observer();
    let mut completion = controller.start(Money::create("10.00").unwrap());

    controller.on_tendered_input_changed("5.00");
    assert_eq!(controller.view().change_text(), "+5.00");
    assert!(!controller.view().is_confirm_enabled());

    controller.on_tendered_input_changed("10.00");
    assert_eq!(controller.view().change_text(), "0.00");
    assert!(controller.view().is_confirm_enabled());

    controller.on_key_released(Key::Enter);

    assert!(controller.is_successful());
    assert_eq!(completion.try_outcome(), Some(TenderOutcome::Successful));
    assert_eq!(observer.notified.load(Ordering::SeqCst), 1);
    assert_eq!(*observer.successes.lock().unwrap(), vec![true]);
}

#[test]
fn test_garbage_input_then_escape() {
    let (mut controller, observer) = controller_with_observer();
    let mut completion = controller.start(Money::create("10.00").unwrap());

    controller.on_tendered_input_changed("abc");
    assert!(controller.view().is_error_shown());
    assert!(!controller.view().is_confirm_enabled());

    controller.on_key_released(Key::Escape);

    assert!(!controller.is_successful());
    assert_eq!(completion.try_outcome(), Some(TenderOutcome::Cancelled));
    assert_eq!(*observer.successes.lock().unwrap(), vec![false]);
}

#[test]
fn test_sufficient_amounts_enable_confirm() {
    let due = Money::create("23.40").unwrap();
    for text in ["23.40", "23,4", "25", "100.00", "999999999.99"] {
        let (mut controller, _) = controller_with_observer();
        let _completion = controller.start(due);

        controller.on_tendered_input_changed(text);

        let tendered = Money::create(text).unwrap();
        assert!(controller.sufficient_funds(), "{text}");
        assert!(controller.view().is_confirm_enabled(), "{text}");
        assert_eq!(
            controller.view().change_text(),
            due.subtract(tendered).format(true)
        );
    }
}

#[test]
fn test_insufficient_amounts_keep_confirm_disabled() {
    let due = Money::create("23.40").unwrap();
    for text in ["0", "23.39", "10", ",5"] {
        let (mut controller, _) = controller_with_observer();
        let _completion = controller.start(due);

        controller.on_tendered_input_changed(text);

        assert!(!controller.sufficient_funds(), "{text}");
        assert!(!controller.view().is_confirm_enabled(), "{text}");
        assert!(controller.view().change_text().starts_with('+'), "{text}");
    }
}

#[test]
fn test_window_close_routes_to_cancel() {
    let (mut controller, observer) = controller_with_observer();
    let _completion = controller.start(Money::from_cents(500));
    controller.on_tendered_input_changed("5");

    controller.dispatch(ViewEvent::Closed);

    assert_eq!(
        controller.state(),
        ControllerState::Done(TenderOutcome::Cancelled)
    );
    assert_eq!(observer.notified.load(Ordering::SeqCst), 1);
}

#[test]
fn test_consecutive_sessions_reset_state() {
    let (mut controller, observer) = controller_with_observer();

    let _first = controller.start(Money::from_cents(500));
    controller.on_tendered_input_changed("5");
    controller.dispatch(ViewEvent::ConfirmActivated);
    assert!(controller.is_successful());

    let mut second = controller.start(Money::from_cents(800));
    assert!(!controller.is_successful());
    assert!(!controller.sufficient_funds());
    assert_eq!(controller.view().amount_due_text(), "8.00");

    controller.on_key_released(Key::Enter);
    assert_eq!(second.try_outcome(), None);

    controller.dispatch(ViewEvent::CancelActivated);
    assert_eq!(second.try_outcome(), Some(TenderOutcome::Cancelled));
    assert_eq!(*observer.successes.lock().unwrap(), vec![true, false]);
}

#[tokio::test]
async fn test_run_with_events_from_view_handle() {
    let (mut controller, observer) = controller_with_observer();
    let events = controller.view().events().cloned().unwrap();

    tokio::spawn(async move {
        events.tendered_text_changed("7");
        events.key_released(Key::Enter);
        events.tendered_text_changed("7,50");
        events.key_released(Key::Enter);
    });

    let outcome = controller.run(Money::from_cents(750)).await;

    assert_eq!(outcome, TenderOutcome::Successful);
    assert_eq!(observer.notified.load(Ordering::SeqCst), 1);
    let record = controller.record().unwrap();
    assert_eq!(record.change_due, Some(Money::zero()));
}
