//! fb-post-scraper main entry point
//!
//! Command-line interface that scrapes an account or group feed into a CSV file.

use anyhow::{bail, Context};
use clap::Parser;
use fb_post_scraper::config::{load_config, Config};
use fb_post_scraper::feed::{get_posts, FeedOptions, Target};
use fb_post_scraper::output::{default_filename, write_posts_to_csv, OutputError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// fb-post-scraper: scrape public feed posts to CSV
///
/// Follows the feed's pagination cursor page by page and writes one row per
/// post (id, text, time, image, engagement counts, permalink, outbound link).
#[derive(Parser, Debug)]
#[command(name = "fb-post-scraper")]
#[command(version)]
#[command(about = "Scrape public feed posts to CSV", long_about = None)]
struct Cli {
    /// Account (page or profile) name
    #[arg(value_name = "ACCOUNT", required_unless_present = "group")]
    account: Option<String>,

    /// Group id to scrape instead of an account
    #[arg(short, long, conflicts_with = "account")]
    group: Option<String>,

    /// Output filename, defaults to <ACCOUNT>_posts.csv
    #[arg(short, long)]
    filename: Option<PathBuf>,

    /// Number of pages to download
    #[arg(short, long, conflicts_with = "all_pages")]
    pages: Option<u32>,

    /// Keep following cursors until the feed ends
    #[arg(long)]
    all_pages: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Seconds to wait before each follow-up page request
    #[arg(long)]
    sleep: Option<f64>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli)?;

    let options = FeedOptions::from_config(&config).context("Invalid configuration")?;
    let target = Target::from_selection(cli.account.clone(), cli.group.clone())?;
    let filename = cli
        .filename
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_filename(&target)));

    tracing::info!(
        "Page limit: {}, timeout: {}s, sleep: {}ms",
        options
            .page_limit
            .map_or_else(|| "unbounded".to_string(), |limit| limit.to_string()),
        config.session.timeout_secs,
        config.scraper.sleep_ms
    );

    let posts = get_posts(&target, options)?;
    match write_posts_to_csv(posts, &filename) {
        Ok(count) => {
            tracing::info!("Scraped {} posts into {}", count, filename.display());
            Ok(())
        }
        Err(OutputError::NoPosts) => {
            eprintln!("Couldn't get any posts.");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to write {}", filename.display())),
    }
}

/// Applies command-line flags on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) -> anyhow::Result<()> {
    if cli.all_pages {
        config.scraper.page_limit = None;
    } else if let Some(pages) = cli.pages {
        config.scraper.page_limit = Some(pages);
    }

    if let Some(timeout) = cli.timeout {
        config.session.timeout_secs = timeout;
    }

    if let Some(sleep) = cli.sleep {
        if !sleep.is_finite() || sleep < 0.0 {
            bail!("--sleep must be a non-negative number of seconds, got {}", sleep);
        }
        config.scraper.sleep_ms = (sleep * 1000.0).round() as u64;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fb_post_scraper=info,warn"),
            1 => EnvFilter::new("fb_post_scraper=debug,info"),
            2 => EnvFilter::new("fb_post_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
