//! # cashdesk-cli: Terminal Cash Payment
//!
//! Runs one cash payment on the terminal and prints the outcome record as a
//! JSON line on stdout. Logs go to stderr.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   args ──► TenderConfig::load ──► parse_amount_due                      │
//! │                                          │                              │
//! │                                          ▼                              │
//! │   stdin ──► TerminalInput::pump ──► CashPaymentController::run          │
//! │                                          │                              │
//! │                         TerminalView ◄───┤                              │
//! │                                          ▼                              │
//! │                              PaymentRecord as JSON ──► stdout           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod terminal;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use cashdesk_core::validation::parse_amount_due;
use cashdesk_core::TenderOutcome;
use cashdesk_tender::{CashPaymentController, PaymentObserver, PaymentStatus, TenderConfig};
use tokio::io::BufReader;
use tracing::{error, info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use error::{CliError, CliResult};
pub use terminal::{TenderedField, TerminalInput, TerminalView};

pub const USAGE: &str = "usage: cashdesk-cli <amount-due> [--config <path>]";

/// Exit code for a confirmed payment.
pub const EXIT_PAID: i32 = 0;
/// Exit code for a cancelled payment.
pub const EXIT_CANCELLED: i32 = 1;
/// Exit code for bad arguments, configuration or output failures.
pub const EXIT_ERROR: i32 = 2;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub amount_due: String,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Parses arguments, program name excluded.
    pub fn parse<I>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let mut amount_due = None;
        let mut config = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let value = args
                        .get(i + 1)
                        .ok_or_else(|| CliError::MissingValue(args[i].clone()))?;
                    config = Some(PathBuf::from(value));
                    i += 1;
                }
                flag if flag.starts_with("--") => {
                    return Err(CliError::UnknownArgument(flag.to_string()));
                }
                value if amount_due.is_none() => amount_due = Some(value.to_string()),
                extra => return Err(CliError::UnknownArgument(extra.to_string())),
            }
            i += 1;
        }

        Ok(CliArgs {
            amount_due: amount_due.ok_or(CliError::MissingAmount)?,
            config,
        })
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Initializes tracing on stderr, keeping stdout for the outcome record.
///
/// ## Log Levels
/// - Default: INFO for everything, DEBUG for cashdesk crates
/// - Override with RUST_LOG, e.g. `RUST_LOG=cashdesk_tender=trace`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    subscriber(filter).init();
}

pub const DEFAULT_LOG_FILTER: &str = "info,cashdesk=debug";

/// Formatting subscriber on stderr; `filter` alone decides what is logged.
pub fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish()
}

/// Logs every finished payment.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl PaymentObserver for LoggingObserver {
    fn notify(&self, payment: &dyn PaymentStatus) {
        info!(
            outcome = %payment.outcome(),
            successful = payment.is_successful(),
            "Payment finished"
        );
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Runs the CLI and returns the process exit code.
pub async fn run() -> i32 {
    init_tracing();

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n{}", err, USAGE);
            return EXIT_ERROR;
        }
    };

    match execute(args).await {
        Ok(outcome) => exit_code(outcome),
        Err(err) => {
            error!(%err, "Cash payment failed");
            eprintln!("error: {}", err);
            EXIT_ERROR
        }
    }
}

/// Maps a terminal outcome to the process exit code.
pub fn exit_code(outcome: TenderOutcome) -> i32 {
    if outcome.is_successful() {
        EXIT_PAID
    } else {
        EXIT_CANCELLED
    }
}

async fn execute(args: CliArgs) -> CliResult<TenderOutcome> {
    let config = TenderConfig::load(args.config)?;
    let amount_due = parse_amount_due(&args.amount_due)?;

    let view = TerminalView::new(io::stdout(), config.display.currency_symbol.clone());
    let mut controller = CashPaymentController::new(view, config);
    controller.register_observer(Arc::new(LoggingObserver));

    let input = controller
        .view()
        .input()
        .ok_or(CliError::ViewNotRegistered)?;
    tokio::spawn(input.pump(BufReader::new(tokio::io::stdin())));

    let outcome = controller.run(amount_due).await;

    if let Some(record) = controller.record() {
        let mut stdout = io::stdout().lock();
        serde_json::to_writer(&mut stdout, &record)?;
        writeln!(stdout)?;
    }

    Ok(outcome)
}
