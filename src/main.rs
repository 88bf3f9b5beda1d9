//! Sitescribe main entry point
//!
//! Command-line interface for the recursive website-to-markdown archiver.

use clap::Parser;
use sitescribe::config::{load_config_file, merge, CliOverrides, FileConfig};
use sitescribe::run_crawl;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Sitescribe: a recursive website-to-markdown archiver
///
/// Sitescribe fetches every page reachable from a starting address, within
/// configured depth and scope limits, and writes one markdown document per
/// page plus a report of all external links discovered.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version)]
#[command(about = "A recursive website-to-markdown archiver", long_about = None)]
struct Cli {
    /// The URL to start scraping from
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Maximum depth for recursive scraping of internal links
    #[arg(long)]
    max_depth: Option<u32>,

    /// Maximum depth for external link scraping
    #[arg(long)]
    external_depth: Option<u32>,

    /// Number of concurrent requests
    #[arg(long)]
    concurrent_requests: Option<usize>,

    /// Whether to scrape external links
    #[arg(long)]
    scrape_external: bool,

    /// Path to save the scraped markdown files
    #[arg(long, value_name = "DIR")]
    output_path: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let file = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config_file(path)?
        }
        None => FileConfig::default(),
    };

    let config = merge(
        file,
        CliOverrides {
            start_url: cli.start_url,
            max_depth: cli.max_depth,
            external_depth: cli.external_depth,
            concurrent_requests: cli.concurrent_requests,
            scrape_external: cli.scrape_external.then_some(true),
            output_path: cli.output_path,
        },
    )?;

    tracing::info!("Starting URL: {}", config.start_url);
    tracing::info!("Maximum depth: {}", config.max_depth);
    tracing::info!("External links depth: {}", config.external_depth);
    tracing::info!("Concurrent requests: {}", config.concurrent_requests);
    tracing::info!("Scrape external links: {}", config.scrape_external);
    tracing::info!("Output path: {}", config.output_path.display());

    // Interrupt handling: the first Ctrl-C cancels the run; in-flight
    // fetches finish or time out, then the join completes.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Received an interrupt, stopping crawl...");
                cancel.cancel();
            }
        });
    }

    let summary = run_crawl(config, cancel).await?;

    println!("Scraping completed");
    println!("Documents created: {}", summary.documents_created);
    println!("URLs scanned: {}", summary.urls_scanned);
    println!("Total time: {:.2?}", summary.elapsed);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            2 => EnvFilter::new("sitescribe=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
