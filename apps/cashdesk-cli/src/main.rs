//! # Cashdesk CLI Entry Point
//!
//! ## Usage
//! ```bash
//! # Collect 12.50 in cash
//! cargo run -p cashdesk-cli -- 12.50
//!
//! # With an explicit config file
//! cargo run -p cashdesk-cli -- 12.50 --config ./tender.toml
//! ```
//!
//! Exit codes: 0 paid, 1 cancelled, 2 bad arguments or configuration.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = cashdesk_cli::run().await;
    // Exit here: a pending stdin read would otherwise hold up runtime shutdown
    std::process::exit(code);
}
