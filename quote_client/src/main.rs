//! Quote Client — shows a random quotation fetched from a JSON API and refreshes it
//! every 10 seconds. Press Enter (or `r`) for a new quote right away, `q` or Ctrl+C to quit.
//!
//! Usage example (CLI):
//! ```bash
//! RUST_LOG=debug quote_client
//! quote_client --verbose
//! ```
//!
//! Fetch failures are logged and otherwise ignored: the last quote stays on screen until
//! the next successful refresh.
#![warn(missing_docs)]
use std::sync::Arc;

use clap::Parser;
use log::info;
use quote_client::ClientError;
use quote_client::RefreshController;
use quote_client::args::Args;
use quote_client::display;
use quote_common::net::REFRESH_INTERVAL;
use quote_common::{HttpQuoteSource, SourceConfig};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    let args = Args::parse();
    init_logger(args.verbose);

    let source = HttpQuoteSource::new(SourceConfig::default())?;
    info!("Fetching quotes from {}", source.url());

    println!(
        "Quotes auto-refresh every {} seconds. Press Enter for a new quote, 'q' to quit.",
        REFRESH_INTERVAL.as_secs()
    );

    let controller = RefreshController::new(Arc::new(source));
    display::run(controller).await?;

    info!("Client stopped");
    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
