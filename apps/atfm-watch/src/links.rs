//! PDF link extraction from the listing page

use std::collections::HashSet;

use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{Html, Selector};
use shared_types::DocumentRef;
use tracing::debug;

lazy_static! {
    static ref ANCHOR: Selector = Selector::parse("a[href]").unwrap();
}

/// Absolute URLs of every linked PDF, in page order, first occurrence only.
///
/// Relative hrefs resolve against `page_url`. Only http(s) links whose
/// path ends in `.pdf` (any case) are kept.
pub fn extract_pdf_links(html: &str, page_url: &Url) -> Vec<DocumentRef> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        let url = match page_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                debug!(href, error = %e, "Skipping unresolvable link");
                continue;
            }
        };

        if !matches!(url.scheme(), "http" | "https") || !is_pdf_path(&url) {
            continue;
        }

        let doc = DocumentRef::new(url.to_string());
        if seen.insert(doc.clone()) {
            links.push(doc);
        }
    }

    links
}

fn is_pdf_path(url: &Url) -> bool {
    url.path().to_ascii_lowercase().ends_with(".pdf")
}
