//! PDF text extraction
//!
//! Turns raw PDF bytes into per-page text, one string per page of the
//! document. Line breaks are whatever the layout reconstruction in
//! `pdf-extract` produced; callers must not assume clean prose.

use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::ExtractError;

/// How far into the file the `%PDF` header may start
const HEADER_SEARCH_LIMIT: usize = 1024;

/// Source of page text for a document.
///
/// The production implementation is [`PdfTextExtractor`]; tests substitute
/// their own to drive the extractor with plain text.
pub trait TextExtractor {
    fn pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractError>;
}

/// Extracts page text with `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for PdfTextExtractor {
    fn pages(&self, data: &[u8]) -> Result<Vec<String>, ExtractError> {
        if !has_pdf_header(data) {
            return Err(ExtractError::ParseError("missing %PDF header".to_string()));
        }

        // pdf-extract panics on some malformed producers instead of returning an error
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(data)
        }))
        .map_err(|payload| ExtractError::Panicked(panic_message(payload.as_ref())))?;

        let raw = result.map_err(|e| ExtractError::ParseError(e.to_string()))?;
        let total = raw.len();
        let pages: Vec<String> = raw
            .into_iter()
            .filter(|page| !page.trim().is_empty())
            .collect();
        debug!(pages = pages.len(), blank = total - pages.len(), "Extracted PDF text");
        Ok(pages)
    }
}

fn has_pdf_header(data: &[u8]) -> bool {
    let head = &data[..data.len().min(HEADER_SEARCH_LIMIT)];
    head.windows(4).any(|w| w == b"%PDF")
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic in PDF backend".to_string()
    }
}

/// Split plain text into pages on form feed characters.
///
/// For text sources that mark page breaks inline. Text without form feeds
/// is a single page. Blank pages are dropped.
pub fn split_pages(text: &str) -> Vec<String> {
    if !text.contains('\x0C') {
        return vec![text.to_string()];
    }

    text.split('\x0C')
        .filter(|page| !page.trim().is_empty())
        .map(str::to_string)
        .collect()
}
