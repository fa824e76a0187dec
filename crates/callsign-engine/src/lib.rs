//! Callsign extraction from ATFM measure PDFs
//!
//! Finds flight callsigns printed near an airport code. Matching runs over
//! a window of lines around each marker line rather than a single line,
//! because PDF text extraction frequently wraps table cells.
//!
//! ```no_run
//! use callsign_engine::CallsignExtractor;
//!
//! # fn run(pdf_bytes: &[u8]) -> Result<(), callsign_engine::ExtractError> {
//! let extractor = CallsignExtractor::new();
//! for callsign in extractor.extract(pdf_bytes)? {
//!     println!("{callsign}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod extract;
pub mod patterns;
pub mod window;

use std::collections::BTreeSet;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

pub use extract::{split_pages, PdfTextExtractor, TextExtractor};
pub use patterns::{CALLSIGN_PATTERN, DEFAULT_MARKER, WINDOW_RADIUS};
pub use window::{marker_windows, TextWindow};

/// Errors raised while turning a document into callsigns
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("PDF backend panicked: {0}")]
    Panicked(String),

    #[error("Invalid marker: {0:?}")]
    InvalidMarker(String),
}

/// Finds callsigns near a marker in document text
#[derive(Debug, Clone)]
pub struct CallsignExtractor<E = PdfTextExtractor> {
    text: E,
    marker: Regex,
    window_radius: usize,
}

impl CallsignExtractor {
    /// Extractor for [`DEFAULT_MARKER`] over real PDFs
    pub fn new() -> Self {
        Self {
            text: PdfTextExtractor::new(),
            marker: patterns::DEFAULT_MARKER_RE.clone(),
            window_radius: WINDOW_RADIUS,
        }
    }

    pub fn for_marker(marker: &str) -> Result<Self, ExtractError> {
        Self::with_text_extractor(PdfTextExtractor::new(), marker)
    }
}

impl Default for CallsignExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextExtractor> CallsignExtractor<E> {
    pub fn with_text_extractor(text: E, marker: &str) -> Result<Self, ExtractError> {
        let marker = patterns::marker_regex(marker)
            .ok_or_else(|| ExtractError::InvalidMarker(marker.to_string()))?;
        Ok(Self {
            text,
            marker,
            window_radius: WINDOW_RADIUS,
        })
    }

    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn window_radius(&self) -> usize {
        self.window_radius
    }

    /// Callsigns near the marker anywhere in the document
    pub fn extract(&self, data: &[u8]) -> Result<BTreeSet<String>, ExtractError> {
        let pages = self.text.pages(data)?;
        Ok(self.callsigns_in_pages(&pages))
    }

    pub fn callsigns_in_pages<S: AsRef<str>>(&self, pages: &[S]) -> BTreeSet<String> {
        pages
            .iter()
            .flat_map(|page| self.callsigns_in_page(page.as_ref()))
            .collect()
    }

    /// Windows never cross page boundaries
    pub fn callsigns_in_page(&self, page: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        for window in marker_windows(page, &self.marker, self.window_radius) {
            let before = found.len();
            found.extend(patterns::find_callsigns(&window.text).map(str::to_string));
            debug!(
                line = window.marker_line,
                new = found.len() - before,
                "Scanned marker window"
            );
        }
        found
    }
}
