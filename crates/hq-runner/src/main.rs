//! # hq-runner
//!
//! Command-line entry point for the quote feed normalizer.
//!
//! Loads a JSON configuration file, performs one quote acquisition and prints
//! the full quote table and the status subset.
//!
//! # Usage
//!
//! ```bash
//! hq-runner config.json --log-level info
//! hq-runner config.json --codes sh000001,hk00700 --sort desc --json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hq_core::NormalizedQuote;
use hq_core::sort::SortOrder;
use hq_feed::QuoteService;
use tracing::{info, warn};

/// Quote feed normalizer.
#[derive(Parser)]
#[command(name = "hq-runner", about = "Fetch and normalize hq_str stock quotes")]
struct Cli {
    /// Configuration file path (JSON).
    config: PathBuf,

    /// Codes to fetch, overriding `codes` from the config.
    #[arg(long, value_delimiter = ',')]
    codes: Option<Vec<String>>,

    /// Codes pinned to the status subset, overriding `status_bar_codes`.
    #[arg(long, value_delimiter = ',')]
    pinned: Option<Vec<String>>,

    /// Sort order by percent change, overriding `sort_order`.
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,

    /// Print the result as JSON instead of tables.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error). Defaults to the config value.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Optional log directory for file output.
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load configuration
    let config = hq_core::config::load_config(&cli.config)?;

    // 2. Initialize logging
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level());
    let log_dir = cli.log_dir.clone().or_else(|| config.log_path());
    let _log_guard = hq_core::logging::init_logging(&log_level, log_dir.as_deref(), &config.module_name());

    info!("hq-runner starting, config={}, log_level={log_level}", cli.config.display());

    let codes = cli.codes.unwrap_or_else(|| config.codes.clone());
    let pinned = cli.pinned.unwrap_or_else(|| config.status_bar_codes.clone());
    let order = cli.sort.unwrap_or(config.sort_order);
    info!("config loaded, {} code(s), {} pinned, order={order:?}", codes.len(), pinned.len());

    // 3. Build the service and run one acquisition
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let service = QuoteService::from_config(&config.feed, tx).context("failed to build quote service")?;
    let result = service.get_quotes(&codes, &pinned, order).await;

    // 4. Surface notifications
    while let Ok(event) = rx.try_recv() {
        warn!("{event}");
    }

    // 5. Print
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_table("quotes", &result.all);
        println!();
        print_table("status", &result.status_subset);
    }

    info!("done, {} quote(s)", result.all.len());
    Ok(())
}

fn print_table(title: &str, quotes: &[NormalizedQuote]) {
    println!("== {title} ({}) ==", quotes.len());
    println!(
        "{:<4} {:<10} {:<12} {:>10} {:>10} {:>8} {:>8} {:>12} {:>12}",
        "mkt", "symbol", "name", "price", "yclose", "change", "pct%", "volume", "amount"
    );
    for q in quotes {
        let p = &q.pricing;
        println!(
            "{:<4} {:<10} {:<12} {:>10} {:>10} {:>8} {:>8} {:>12} {:>12}",
            q.market_tag(),
            q.symbol,
            q.name,
            p.price(),
            p.yesterday_close(),
            p.change(),
            p.change_percent(),
            q.volume.to_string(),
            q.amount.to_string(),
        );
    }
}
