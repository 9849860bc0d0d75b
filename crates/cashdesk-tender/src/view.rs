//! # View Contract
//!
//! The presentation side of a cash payment. A view renders whatever the
//! controller tells it to and reports raw input back as [`ViewEvent`]s.
//!
//! ## Event Slots
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CashPaymentController::new(view)                                       │
//! │       │                                                                 │
//! │       └──► view.register(ViewEvents)   (once, at construction)          │
//! │                                                                         │
//! │  ViewEvents slot             queued event                               │
//! │  ───────────────────────     ─────────────────────────────────          │
//! │  tendered_text_changed  ──►  ViewEvent::TenderedTextChanged(text)       │
//! │  key_released           ──►  ViewEvent::KeyReleased(key)                │
//! │  confirm_activated      ──►  ViewEvent::ConfirmActivated                │
//! │  cancel_activated       ──►  ViewEvent::CancelActivated                 │
//! │  closed                 ──►  ViewEvent::Closed                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cashdesk_core::Key;
use tokio::sync::mpsc;
use tracing::debug;

// =============================================================================
// View Events
// =============================================================================

/// Raw input delivered from a view to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The tendered field's content changed.
    TenderedTextChanged(String),
    /// A key was released inside the tendered field.
    KeyReleased(Key),
    /// The confirm control was activated.
    ConfirmActivated,
    /// The cancel control was activated.
    CancelActivated,
    /// The view was dismissed by other means (window close, ...).
    Closed,
}

/// Handle a view uses to deliver input to its controller.
///
/// Cloneable; every clone feeds the same controller. Once all handles are
/// dropped, a controller waiting in `run` treats the payment as abandoned.
#[derive(Debug, Clone)]
pub struct ViewEvents {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ViewEvents {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<ViewEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ViewEvents { tx }, rx)
    }

    /// Delivers any event.
    pub fn send(&self, event: ViewEvent) {
        if let Err(err) = self.tx.send(event) {
            debug!(event = ?err.0, "Controller gone, dropping view event");
        }
    }

    pub fn tendered_text_changed(&self, text: impl Into<String>) {
        self.send(ViewEvent::TenderedTextChanged(text.into()));
    }

    pub fn key_released(&self, key: Key) {
        self.send(ViewEvent::KeyReleased(key));
    }

    pub fn confirm_activated(&self) {
        self.send(ViewEvent::ConfirmActivated);
    }

    pub fn cancel_activated(&self) {
        self.send(ViewEvent::CancelActivated);
    }

    pub fn closed(&self) {
        self.send(ViewEvent::Closed);
    }
}

// =============================================================================
// TenderView Trait
// =============================================================================

/// Display commands the controller issues to its view.
///
/// Amounts arrive already formatted. A view must keep the confirm control
/// inert while it is disabled: the controller confirms unconditionally when
/// that control is activated.
pub trait TenderView {
    /// Receives the event handle. Called once, when the controller is built.
    fn register(&mut self, events: ViewEvents);

    /// Shows the amount due (unsigned).
    fn show_amount_due(&mut self, amount: &str);

    /// Shows the change due in the change field.
    fn show_change(&mut self, change: &str);

    /// Shows the error marker in place of a change amount.
    fn show_error_marker(&mut self, marker: &str);

    fn set_confirm_enabled(&mut self, enabled: bool);

    /// Marks the tendered field as holding a sufficient (valid) amount or not.
    fn mark_tendered_field(&mut self, valid: bool);

    /// Marks the change field as valid or not.
    fn mark_change_field(&mut self, valid: bool);

    fn clear_tendered_text(&mut self);

    /// Current full text of the tendered field.
    fn tendered_text(&self) -> String;

    fn show(&mut self);

    fn hide(&mut self);
}

// =============================================================================
// Recording View
// =============================================================================

/// Headless view that keeps the last state of every widget.
///
/// Used by tests and by drivers that have no screen at all.
#[derive(Debug, Default)]
pub struct RecordingView {
    amount_due_text: String,
    change_text: String,
    error_shown: bool,
    confirm_enabled: bool,
    tendered_valid: bool,
    change_valid: bool,
    tendered_text: String,
    visible: bool,
    show_count: usize,
    hide_count: usize,
    events: Option<ViewEvents>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tendered field's text without emitting any event,
    /// like typing before the key is released.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.tendered_text = text.into();
    }

    /// The event handle handed over at registration.
    pub fn events(&self) -> Option<&ViewEvents> {
        self.events.as_ref()
    }

    /// Drops the event handle, as a torn-down window would.
    pub fn detach(&mut self) {
        self.events = None;
    }

    pub fn amount_due_text(&self) -> &str {
        &self.amount_due_text
    }

    pub fn change_text(&self) -> &str {
        &self.change_text
    }

    pub fn is_error_shown(&self) -> bool {
        self.error_shown
    }

    pub fn is_confirm_enabled(&self) -> bool {
        self.confirm_enabled
    }

    pub fn is_tendered_marked_valid(&self) -> bool {
        self.tendered_valid
    }

    pub fn is_change_marked_valid(&self) -> bool {
        self.change_valid
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show_count(&self) -> usize {
        self.show_count
    }

    pub fn hide_count(&self) -> usize {
        self.hide_count
    }
}

impl TenderView for RecordingView {
    fn register(&mut self, events: ViewEvents) {
        self.events = Some(events);
    }

    fn show_amount_due(&mut self, amount: &str) {
        self.amount_due_text = amount.to_string();
    }

    fn show_change(&mut self, change: &str) {
        self.change_text = change.to_string();
        self.error_shown = false;
    }

    fn show_error_marker(&mut self, marker: &str) {
        self.change_text = marker.to_string();
        self.error_shown = true;
    }

    fn set_confirm_enabled(&mut self, enabled: bool) {
        self.confirm_enabled = enabled;
    }

    fn mark_tendered_field(&mut self, valid: bool) {
        self.tendered_valid = valid;
    }

    fn mark_change_field(&mut self, valid: bool) {
        self.change_valid = valid;
    }

    fn clear_tendered_text(&mut self) {
        self.tendered_text.clear();
    }

    fn tendered_text(&self) -> String {
        self.tendered_text.clone()
    }

    fn show(&mut self) {
        self.visible = true;
        self.show_count += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.hide_count += 1;
    }
}
