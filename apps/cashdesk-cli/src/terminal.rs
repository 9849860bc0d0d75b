//! # Terminal View
//!
//! Renders the payment dialog as plain lines and turns input lines into
//! view events.
//!
//! ## Input Lines
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  line        │  effect                                                  │
//! │──────────────┼──────────────────────────────────────────────────────────│
//! │  :enter      │  Enter released                                          │
//! │  :esc        │  Escape released                                         │
//! │  :ok         │  confirm control activated                               │
//! │  :cancel     │  cancel control activated                                │
//! │  anything    │  replaces the tendered field, delivered with its text    │
//! │  EOF         │  view closed                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

use cashdesk_core::Key;
use cashdesk_tender::{TenderView, ViewEvents};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// Text of the tendered field, shared between renderer and input.
#[derive(Debug, Clone, Default)]
pub struct TenderedField(Arc<Mutex<String>>);

impl TenderedField {
    pub fn get(&self) -> String {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, text: &str) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = text.to_string();
    }

    pub fn clear(&self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

// =============================================================================
// Terminal View
// =============================================================================

pub struct TerminalView<W: Write> {
    out: W,
    field: TenderedField,
    events: Option<ViewEvents>,
    currency_symbol: String,
    confirm_enabled: Option<bool>,
    tendered_valid: Option<bool>,
    change_valid: Option<bool>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, currency_symbol: impl Into<String>) -> Self {
        TerminalView {
            out,
            field: TenderedField::default(),
            events: None,
            currency_symbol: currency_symbol.into(),
            confirm_enabled: None,
            tendered_valid: None,
            change_valid: None,
        }
    }

    /// Input side of this view. `None` until a controller registered.
    pub fn input(&self) -> Option<TerminalInput> {
        self.events.as_ref().map(|events| TerminalInput {
            field: self.field.clone(),
            events: events.clone(),
        })
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn decorate(&self, amount: &str) -> String {
        if self.currency_symbol.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, self.currency_symbol)
        }
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{}", text) {
            warn!(%err, "Failed to write to terminal");
        }
    }
}

impl<W: Write> TenderView for TerminalView<W> {
    fn register(&mut self, events: ViewEvents) {
        self.events = Some(events);
    }

    // First command of every session: the header opens a fresh screen
    fn show_amount_due(&mut self, amount: &str) {
        self.confirm_enabled = None;
        self.tendered_valid = None;
        self.change_valid = None;
        self.line("=== Cash payment ===");
        let text = format!("Amount due: {}", self.decorate(amount));
        self.line(&text);
    }

    fn show_change(&mut self, change: &str) {
        let text = format!("Change:     {}", self.decorate(change));
        self.line(&text);
    }

    fn show_error_marker(&mut self, marker: &str) {
        let text = format!("Change:     {}", marker);
        self.line(&text);
    }

    fn set_confirm_enabled(&mut self, enabled: bool) {
        if self.confirm_enabled != Some(enabled) {
            self.confirm_enabled = Some(enabled);
            self.line(if enabled {
                "[OK] available (:ok or :enter)"
            } else {
                "[OK] unavailable"
            });
        }
    }

    fn mark_tendered_field(&mut self, valid: bool) {
        if self.tendered_valid != Some(valid) {
            self.tendered_valid = Some(valid);
            self.line(if valid { "Tendered:   sufficient" } else { "Tendered:   insufficient" });
        }
    }

    fn mark_change_field(&mut self, valid: bool) {
        if self.change_valid != Some(valid) {
            self.change_valid = Some(valid);
            self.line(if valid { "Change:     [valid]" } else { "Change:     [invalid]" });
        }
    }

    fn clear_tendered_text(&mut self) {
        self.field.clear();
    }

    fn tendered_text(&self) -> String {
        self.field.get()
    }

    fn show(&mut self) {
        self.line("Type an amount, :enter, :ok, :esc or :cancel");
    }

    fn hide(&mut self) {
        self.line("=== closed ===");
        if let Err(err) = self.out.flush() {
            warn!(%err, "Failed to flush terminal");
        }
    }
}

// =============================================================================
// Terminal Input
// =============================================================================

/// Feeds input lines to the controller as view events.
#[derive(Debug, Clone)]
pub struct TerminalInput {
    field: TenderedField,
    events: ViewEvents,
}

impl TerminalInput {
    pub fn handle_line(&self, line: &str) {
        match line.trim() {
            ":enter" => self.events.key_released(Key::Enter),
            ":esc" => self.events.key_released(Key::Escape),
            ":ok" => self.events.confirm_activated(),
            ":cancel" => self.events.cancel_activated(),
            // The event carries the text so later lines cannot overtake it
            _ => {
                self.field.set(line);
                self.events.tendered_text_changed(line);
            }
        }
    }

    /// Reads lines until EOF, then reports the view as closed.
    pub async fn pump<R>(self, reader: R)
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = reader.lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => self.handle_line(&line),
                Ok(None) => {
                    debug!("Input closed");
                    break;
                }
                Err(err) => {
                    warn!(%err, "Failed to read input");
                    break;
                }
            }
        }
        self.events.closed();
    }
}
