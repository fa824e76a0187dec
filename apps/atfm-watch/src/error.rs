//! Error types for the watcher

use thiserror::Error;

/// HTTP retrieval errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Seen-set persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a whole run
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to fetch listing: {0}")]
    Listing(#[source] FetchError),
}
