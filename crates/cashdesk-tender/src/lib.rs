//! # cashdesk-tender: Cash Payment Controller
//!
//! The cash-payment step of a checkout. Given an amount due, the controller
//! collects a tendered amount, shows the change owed and decides whether the
//! payment may be confirmed.
//!
//! ## Collaborators
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   caller ── start(amount_due) ──► CashPaymentController ──► Completion  │
//! │                                      ▲            │                     │
//! │                          ViewEvent   │            │ display commands    │
//! │                                      │            ▼                     │
//! │                                   ┌──────────────────┐                  │
//! │                                   │   TenderView     │                  │
//! │                                   └──────────────────┘                  │
//! │                                                                         │
//! │   on confirm / cancel:  hide view ──► notify PaymentObservers           │
//! │                                   ──► resolve Completion                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use cashdesk_core::{Key, Money};
//! use cashdesk_tender::{CashPaymentController, RecordingView, TenderConfig};
//!
//! let mut controller = CashPaymentController::new(RecordingView::new(), TenderConfig::default());
//! controller.start(Money::from_cents(1000));
//!
//! controller.on_tendered_input_changed("20");
//! assert_eq!(controller.view().change_text(), "-10.00");
//!
//! controller.on_key_released(Key::Enter);
//! assert!(controller.is_successful());
//! ```

pub mod completion;
pub mod config;
pub mod controller;
pub mod error;
pub mod observer;
pub mod session;
pub mod view;

pub use completion::Completion;
pub use config::TenderConfig;
pub use controller::{CashPaymentController, ControllerState};
pub use error::{TenderError, TenderResult};
pub use observer::{ObserverList, PaymentObserver, PaymentStatus};
pub use session::{PaymentRecord, PaymentSession, TenderCheck};
pub use view::{RecordingView, TenderView, ViewEvent, ViewEvents};
