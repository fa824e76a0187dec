//! One watch pass: listing → new documents → callsigns → alert → seen state
//!
//! Every per-document and notification failure becomes an outcome value on
//! the [`RunReport`]. Only a listing failure aborts the pass.

use alert_mailer::{compose_alert, Alert};
use callsign_engine::{CallsignExtractor, TextExtractor};
use chrono::{DateTime, Utc};
use shared_types::{AlertRecord, DocumentRef, SeenSet};
use tracing::{debug, error, info, instrument, warn};

use crate::config::WatchConfig;
use crate::error::{FetchError, WatchError};
use crate::store::SeenStore;

/// Discovers document links
pub trait ListingSource {
    fn pdf_links(&self) -> Result<Vec<DocumentRef>, FetchError>;
}

/// Downloads a single document
pub trait DocumentSource {
    fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, FetchError>;
}

/// Delivers a composed alert
pub trait AlertSink {
    fn deliver(&self, alert: &Alert) -> NotifyOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    Alerted(AlertRecord),
    NoMatches,
    DownloadFailed(String),
    ParseFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub document: DocumentRef,
    pub outcome: DocumentOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    NothingToSend,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved { entries: usize },
    Skipped(String),
    Failed(String),
}

/// What a single pass did
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub links_found: usize,
    /// New documents, in discovery order
    pub processed: Vec<ProcessedDocument>,
    pub alert: Option<Alert>,
    pub notify: NotifyOutcome,
    pub persist: PersistOutcome,
}

impl RunReport {
    pub fn alerts(&self) -> impl Iterator<Item = &AlertRecord> {
        self.processed.iter().filter_map(|p| match &p.outcome {
            DocumentOutcome::Alerted(record) => Some(record),
            _ => None,
        })
    }

    pub fn failures(&self) -> usize {
        self.processed
            .iter()
            .filter(|p| {
                matches!(
                    p.outcome,
                    DocumentOutcome::DownloadFailed(_) | DocumentOutcome::ParseFailed(_)
                )
            })
            .count()
    }
}

/// Wires the components of a pass together
pub struct Watcher<'a, L, D, E, S> {
    config: &'a WatchConfig,
    listing: &'a L,
    documents: &'a D,
    extractor: &'a CallsignExtractor<E>,
    sink: &'a S,
    store: &'a SeenStore,
}

impl<'a, L, D, E, S> Watcher<'a, L, D, E, S>
where
    L: ListingSource,
    D: DocumentSource,
    E: TextExtractor,
    S: AlertSink,
{
    pub fn new(
        config: &'a WatchConfig,
        listing: &'a L,
        documents: &'a D,
        extractor: &'a CallsignExtractor<E>,
        sink: &'a S,
        store: &'a SeenStore,
    ) -> Self {
        Self {
            config,
            listing,
            documents,
            extractor,
            sink,
            store,
        }
    }

    pub fn run(&self) -> Result<RunReport, WatchError> {
        let started_at = Utc::now();
        let mut seen = self.store.load();

        let links = self.listing.pdf_links().map_err(WatchError::Listing)?;
        info!(count = links.len(), "Found PDF links");

        let mut processed = Vec::new();
        for doc in &links {
            if seen.contains(doc) {
                debug!(url = %doc, "Already seen");
                continue;
            }
            info!(url = %doc, "Processing new PDF");
            let outcome = self.process(doc);
            // Marked seen whatever the outcome, so a bad file is not retried every run
            seen.insert(doc.clone());
            processed.push(ProcessedDocument {
                document: doc.clone(),
                outcome,
            });
        }

        let records: Vec<AlertRecord> = processed
            .iter()
            .filter_map(|p| match &p.outcome {
                DocumentOutcome::Alerted(record) => Some(record.clone()),
                _ => None,
            })
            .collect();

        let alert = compose_alert(&self.config.marker, &records);
        let notify = self.notify(alert.as_ref());
        let persist = self.persist(&seen);

        Ok(RunReport {
            started_at,
            links_found: links.len(),
            processed,
            alert,
            notify,
            persist,
        })
    }

    #[instrument(skip_all, fields(url = %doc))]
    fn process(&self, doc: &DocumentRef) -> DocumentOutcome {
        let bytes = match self.documents.fetch(doc) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to download PDF");
                return DocumentOutcome::DownloadFailed(e.to_string());
            }
        };

        let callsigns = match self.extractor.extract(&bytes) {
            Ok(callsigns) => callsigns,
            Err(e) => {
                warn!(error = %e, "Failed to extract PDF text");
                return DocumentOutcome::ParseFailed(e.to_string());
            }
        };

        match AlertRecord::new(doc.clone(), callsigns) {
            Some(record) => {
                info!(callsigns = ?record.callsigns, "{} callsigns found", self.config.marker);
                DocumentOutcome::Alerted(record)
            }
            None => {
                info!("No {} mentions in this PDF", self.config.marker);
                DocumentOutcome::NoMatches
            }
        }
    }

    fn notify(&self, alert: Option<&Alert>) -> NotifyOutcome {
        let Some(alert) = alert else {
            info!("No new {} entries found", self.config.marker);
            return NotifyOutcome::NothingToSend;
        };

        if self.config.dry_run {
            info!(subject = %alert.subject, "Dry run, not sending:\n{}", alert.body);
            return NotifyOutcome::Skipped("dry run".to_string());
        }

        let outcome = self.sink.deliver(alert);
        if let NotifyOutcome::Failed(reason) = &outcome {
            error!(reason = %reason, "Failed to send alert");
        }
        outcome
    }

    fn persist(&self, seen: &SeenSet) -> PersistOutcome {
        if self.config.dry_run {
            return PersistOutcome::Skipped("dry run".to_string());
        }

        match self.store.save(seen) {
            Ok(()) => PersistOutcome::Saved {
                entries: seen.len(),
            },
            Err(e) => {
                error!(path = %self.store.path().display(), error = %e, "Failed to save seen state");
                PersistOutcome::Failed(e.to_string())
            }
        }
    }
}
