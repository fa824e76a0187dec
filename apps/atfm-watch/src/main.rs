//! ATFM watcher binary
//!
//! Runs a single pass and exits; scheduling is left to cron or CI.

use std::path::PathBuf;
use std::time::Duration;

use atfm_watch::config::{DEFAULT_LIST_URL, DEFAULT_SEEN_FILE, DEFAULT_USER_AGENT};
use atfm_watch::{EmailNotifier, HttpSource, SeenStore, WatchConfig, Watcher};
use callsign_engine::{CallsignExtractor, DEFAULT_MARKER};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for the watcher
#[derive(Parser, Debug)]
#[command(name = "atfm-watch")]
#[command(
    version,
    about = "Scan new ATFM measure PDFs for callsigns bound to an airport and email the findings"
)]
struct Args {
    /// Listing page with links to measure PDFs
    #[arg(long, default_value = DEFAULT_LIST_URL)]
    list_url: String,

    /// JSON file recording processed PDFs
    #[arg(long, default_value = DEFAULT_SEEN_FILE)]
    seen_file: PathBuf,

    /// Airport code to look for
    #[arg(long, default_value = DEFAULT_MARKER)]
    marker: String,

    /// User-Agent header for HTTP requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Listing request timeout in seconds
    #[arg(long, default_value = "15")]
    listing_timeout_secs: u64,

    /// Per-document download timeout in seconds
    #[arg(long, default_value = "30")]
    document_timeout_secs: u64,

    /// Log the alert instead of sending it, and leave the seen file untouched
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> WatchConfig {
        WatchConfig {
            list_url: self.list_url,
            seen_file: self.seen_file,
            user_agent: self.user_agent,
            listing_timeout: Duration::from_secs(self.listing_timeout_secs),
            document_timeout: Duration::from_secs(self.document_timeout_secs),
            marker: self.marker,
            dry_run: self.dry_run,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = args.into_config();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        marker = %config.marker,
        dry_run = config.dry_run,
        "Starting ATFM watch"
    );

    let http = HttpSource::new(&config)?;
    let extractor = CallsignExtractor::for_marker(&config.marker)?;
    let notifier = EmailNotifier::from_env();
    let store = SeenStore::new(&config.seen_file);

    let report = Watcher::new(&config, &http, &http, &extractor, &notifier, &store).run()?;

    info!(
        links = report.links_found,
        new = report.processed.len(),
        alerted = report.alerts().count(),
        failed = report.failures(),
        notify = ?report.notify,
        persist = ?report.persist,
        "Run complete"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_config_defaults() {
        let config = Args::parse_from(["atfm-watch"]).into_config();
        let defaults = WatchConfig::default();

        assert_eq!(config.list_url, defaults.list_url);
        assert_eq!(config.seen_file, defaults.seen_file);
        assert_eq!(config.marker, defaults.marker);
        assert_eq!(config.listing_timeout, defaults.listing_timeout);
        assert_eq!(config.document_timeout, defaults.document_timeout);
    }

    #[test]
    fn test_overrides() {
        let config = Args::parse_from([
            "atfm-watch",
            "--marker",
            "VABB",
            "--seen-file",
            "/tmp/state.json",
            "--dry-run",
        ])
        .into_config();

        assert_eq!(config.marker, "VABB");
        assert_eq!(config.seen_file, PathBuf::from("/tmp/state.json"));
        assert!(config.dry_run);
    }
}
