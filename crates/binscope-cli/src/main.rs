//! # binscope-cli
//!
//! Command-line front end for binscope. Parses arguments, sets up logging,
//! runs scope discovery and prints the result as a plain-text report or as
//! JSON.

use std::time::Duration;

use clap::Parser;
use tracing::info;

use binscope_core::BinscopeError;
use binscope_registry::{discover, FetchConfig};

mod output;

/// Find executable (npx-runnable) packages in an npm scope
#[derive(Parser)]
#[command(name = "binscope", version, about = "Find executable packages in an npm scope")]
pub struct Cli {
    /// Scope to search, e.g. '@modelcontextprotocol'
    pub scope: String,

    /// Per-attempt request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Number of retries after the first failed attempt
    #[arg(long, default_value_t = 3)]
    pub retries: u32,

    /// Delay between attempts in milliseconds
    #[arg(long, default_value_t = 1_000)]
    pub retry_delay_ms: u64,

    /// Print the normalized package list as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = FetchConfig {
        timeout: Duration::from_millis(cli.timeout_ms),
        max_retries: cli.retries,
        retry_delay: Duration::from_millis(cli.retry_delay_ms),
    };

    info!("Searching {} for executable packages", cli.scope);
    let packages = discover(&cli.scope, config).await.map_err(friendly)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
    } else {
        output::print_report(&cli.scope, &packages);
    }

    Ok(())
}

/// Attach the error's suggestion, when it has one, to the message the
/// user sees
fn friendly(error: BinscopeError) -> anyhow::Error {
    match error.suggestion() {
        Some(help) => anyhow::anyhow!("{error}\nhelp: {help}"),
        None => anyhow::Error::new(error),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "binscope={level},binscope_registry={level},binscope_core={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
