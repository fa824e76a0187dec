//! Run configuration
//!
//! Built once at startup and passed by reference into each component.

use std::path::PathBuf;
use std::time::Duration;

use callsign_engine::DEFAULT_MARKER;

pub const DEFAULT_LIST_URL: &str = "https://www.atfmaai.aero/portal/en/news/atfm-measures";
pub const DEFAULT_SEEN_FILE: &str = "seen.json";
pub const DEFAULT_USER_AGENT: &str = "VIDP-ATFM-Watcher/1.0";
pub const DEFAULT_LISTING_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_DOCUMENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Page listing the published measure PDFs
    pub list_url: String,

    /// JSON file holding already-processed document URLs
    pub seen_file: PathBuf,

    /// Sent with every HTTP request
    pub user_agent: String,

    pub listing_timeout: Duration,
    pub document_timeout: Duration,

    /// Airport code searched for in documents
    pub marker: String,

    /// Compose alerts but neither send them nor persist the seen set
    pub dry_run: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            seen_file: PathBuf::from(DEFAULT_SEEN_FILE),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            listing_timeout: DEFAULT_LISTING_TIMEOUT,
            document_timeout: DEFAULT_DOCUMENT_TIMEOUT,
            marker: DEFAULT_MARKER.to_string(),
            dry_run: false,
        }
    }
}
