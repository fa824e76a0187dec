//! ATFM measures watcher
//!
//! Checks the published ATFM measures listing for new PDFs, extracts
//! callsigns printed near the configured airport code, emails a summary and
//! records which documents have been processed.

pub mod config;
pub mod error;
pub mod http;
pub mod links;
pub mod notify;
pub mod runner;
pub mod store;

pub use config::WatchConfig;
pub use error::{FetchError, StoreError, WatchError};
pub use http::HttpSource;
pub use notify::EmailNotifier;
pub use runner::{
    AlertSink, DocumentOutcome, DocumentSource, ListingSource, NotifyOutcome, PersistOutcome,
    ProcessedDocument, RunReport, Watcher,
};
pub use store::SeenStore;
