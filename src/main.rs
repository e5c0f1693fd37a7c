//! Sitewalk main entry point
//!
//! This is the command-line interface for the Sitewalk crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sitewalk::config::{load_config_with_hash, validate, Config};
use sitewalk::crawler::crawl_site;
use sitewalk::output::{compute_statistics, print_entries, print_statistics};
use tracing_subscriber::EnvFilter;

/// Sitewalk: a bounded-depth, same-host web crawler
///
/// Sitewalk fetches the seed page, follows links that stay on the seed's host
/// up to a depth limit, honors the host's robots.txt Disallow rules, and
/// prints the visible text of every page it visited.
#[derive(Parser, Debug)]
#[command(name = "sitewalk")]
#[command(version)]
#[command(about = "A bounded-depth, same-host web crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the maximum crawl depth (the seed is depth 0)
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

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

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_configuration(cli.config.as_deref())?;
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
        validate(&config).context("Invalid --max-depth")?;
    }

    let report = crawl_site(&cli.seed, &config)
        .await
        .with_context(|| format!("Crawl of {} failed", cli.seed))?;

    print_entries(&report.visited, config.output.text_preview_chars)
        .context("Failed to write crawl output")?;

    if config.output.print_statistics && !cli.quiet {
        println!();
        print_statistics(&compute_statistics(&report))
            .context("Failed to write crawl statistics")?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the crawl output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitewalk=info,warn"),
            1 => EnvFilter::new("sitewalk=debug,info"),
            2 => EnvFilter::new("sitewalk=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}
