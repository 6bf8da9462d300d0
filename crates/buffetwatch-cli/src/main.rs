mod fetch;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Collects per-slot buffet pricing from all configured branches and writes
/// the aggregated document to a JSON file. Running with no arguments performs
/// one full fetch cycle for today.
#[derive(Debug, Parser)]
#[command(name = "buffetwatch")]
#[command(about = "Per-branch buffet price collector")]
struct Cli {
    /// Restrict the run to a single configured branch id
    #[arg(long)]
    branch: Option<String>,

    /// Reservation date to query (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output file path (defaults to BUFFETWATCH_OUTPUT_PATH)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the request plan without fetching or writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = buffetwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    fetch::run(
        &config,
        cli.branch.as_deref(),
        cli.date,
        cli.output,
        cli.dry_run,
    )
    .await
}
