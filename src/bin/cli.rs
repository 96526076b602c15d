//! lotwatch CLI
//!
//! One invocation performs exactly one fetch and one diff/notify/persist
//! pass; run it from cron or a similar scheduler for continuous watching.

use std::path::PathBuf;

use clap::Parser;
use lotwatch::{
    error::Result,
    models::{Condition, Config},
    notify::SnsPublisher,
    pipeline::InventoryNotifier,
    services::InventoryClient,
    storage::SnapshotStore,
    utils::http,
};

/// lotwatch - Vehicle Inventory Alerting
#[derive(Parser, Debug)]
#[command(
    name = "lotwatch",
    version,
    about = "Alerts on newly listed vehicle inventory"
)]
struct Cli {
    /// Search market (country code)
    #[arg(short = 'k', long, default_value = "AU")]
    market: String,

    /// Market sub-region, e.g. "Victoria"
    #[arg(short, long, default_value = "Victoria")]
    region: String,

    /// Vehicle model; valid options: m3, ms, my, mx
    #[arg(short, long)]
    model: String,

    /// Vehicle trim codes, comma delimited, e.g. "SRRWD,LRAWD"
    #[arg(short, long)]
    trim: Option<String>,

    /// Listing condition: "new" or "used"
    #[arg(short, long, default_value = "new")]
    condition: Condition,

    /// Path to the snapshot file of previously seen listings
    #[arg(short = 'f', long, default_value = "cache/inventory.json")]
    cache: PathBuf,

    /// AWS SNS ARN to dispatch notifications to
    #[arg(short, long)]
    arn: String,

    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Split a comma-delimited trim list, dropping embedded whitespace.
fn parse_trim(raw: &str) -> Vec<String> {
    raw.replace(' ', "")
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("lotwatch starting...");

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let client = http::create_client(&config.http)?;
    let inventory = InventoryClient::new(client, &cli.market, &cli.region);

    let store = SnapshotStore::new(&cli.cache);
    let publisher = SnsPublisher::from_env(&cli.arn).await;
    let mut notifier = InventoryNotifier::new(store, publisher).await;

    let trim = cli.trim.as_deref().map(parse_trim);

    let results = inventory
        .fetch(&cli.model, trim.as_deref(), cli.condition)
        .await?;

    let outcome = notifier.process_results(results).await?;
    if outcome.recovered {
        log::warn!("Pass failed and was recovered; snapshot reset, error record saved");
    } else if outcome.new_listings > 0 {
        log::info!("Alerted on {} new listings", outcome.new_listings);
    } else {
        log::info!("No new listings");
    }

    log::info!("Done!");

    Ok(())
}
