//! Legiscrawl main entry point
//!
//! Command-line interface for the bill-tracking crawler.

use anyhow::Context;
use clap::Parser;
use legiscrawl::config::load_config;
use legiscrawl::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Legiscrawl: a legislature bill-tracking crawler
///
/// Enumerates parliaments and sessions against a bill publication service,
/// probes versioned bill documents, and persists normalized records into
/// SQLite with idempotent upserts.
#[derive(Parser, Debug)]
#[command(name = "legiscrawl")]
#[command(version)]
#[command(about = "Legislature bill-tracking crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show record counts from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("legiscrawl=info,warn"),
            1 => EnvFilter::new("legiscrawl=debug,info"),
            2 => EnvFilter::new("legiscrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Handles --dry-run: validates config and shows the crawl plan
fn handle_dry_run(config: &legiscrawl::Config) {
    println!("=== Legiscrawl Dry Run ===\n");

    println!("Traversal:");
    println!(
        "  Parliaments: {}..={} (hard cap)",
        config.crawl.first_parliament, config.crawl.max_parliament
    );
    println!("  Sessions per parliament: {}", config.crawl.max_sessions);
    println!("  Max versions per document branch: {}", config.crawl.max_versions);
    println!(
        "  Stop after consecutive empty parliaments: {}",
        config.crawl.stop_after_empty_parliaments
    );
    println!("  Document types: {}", config.crawl.document_types.join(", "));

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Max concurrent fetches: {}", config.http.max_concurrent_fetches);
    println!(
        "  Retries: {} attempts, {}ms apart",
        config.http.retry_attempts, config.http.retry_delay_ms
    );

    println!("\nEndpoints:");
    println!("  Base URL: {}", config.endpoints.base_url);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

/// Handles --stats: shows record counts from the database
fn handle_stats(config: &legiscrawl::Config) -> anyhow::Result<()> {
    use legiscrawl::storage::{open_storage, RecordSink};
    use std::path::Path;

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let (bills, versions, votes) = storage.counts()?;

    println!("Database: {}\n", config.output.database_path);
    println!("  Bills:         {}", bills);
    println!("  Bill versions: {}", versions);
    println!("  Votes:         {}", votes);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: legiscrawl::Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: parliaments {}..={}, {} sessions each",
        config.crawl.first_parliament,
        config.crawl.max_parliament,
        config.crawl.max_sessions
    );

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
