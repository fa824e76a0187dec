//! Blocking HTTP client for the listing page and PDF downloads

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use shared_types::DocumentRef;
use tracing::{debug, instrument};

use crate::config::WatchConfig;
use crate::error::FetchError;
use crate::links::extract_pdf_links;
use crate::runner::{DocumentSource, ListingSource};

/// Fetches both the listing and the documents it links to
pub struct HttpSource {
    client: Client,
    list_url: Url,
    listing_timeout: Duration,
    document_timeout: Duration,
}

impl HttpSource {
    pub fn new(config: &WatchConfig) -> Result<Self, FetchError> {
        let list_url = parse_url(&config.list_url)?;
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            list_url,
            listing_timeout: config.listing_timeout,
            document_timeout: config.document_timeout,
        })
    }

    fn get(&self, url: Url, timeout: Duration) -> Result<Response, FetchError> {
        let url_str = url.to_string();
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .map_err(|e| classify(e, &url_str))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

impl ListingSource for HttpSource {
    #[instrument(skip(self), fields(url = %self.list_url))]
    fn pdf_links(&self) -> Result<Vec<DocumentRef>, FetchError> {
        let html = self
            .get(self.list_url.clone(), self.listing_timeout)?
            .text()
            .map_err(|e| classify(e, self.list_url.as_str()))?;
        debug!(bytes = html.len(), "Fetched listing page");
        Ok(extract_pdf_links(&html, &self.list_url))
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, doc: &DocumentRef) -> Result<Vec<u8>, FetchError> {
        let url = parse_url(doc.as_str())?;
        let bytes = self
            .get(url, self.document_timeout)?
            .bytes()
            .map_err(|e| classify(e, doc.as_str()))?;
        debug!(url = %doc, bytes = bytes.len(), "Downloaded document");
        Ok(bytes.to_vec())
    }
}

fn parse_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn classify(err: reqwest::Error, url: &str) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Request(err)
    }
}
