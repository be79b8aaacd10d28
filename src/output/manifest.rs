//! Crawl manifest data model
//!
//! The JSON shape of these types is the compatibility boundary with the
//! downloader, so field names are fixed by the serde attributes below.

use serde::{Deserialize, Serialize};

/// Normalized text extracted from one successfully processed page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// The page URL
    pub url: String,

    /// Minified body text
    pub content: String,
}

impl PageRecord {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Everything a crawl run has found so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlManifest {
    /// Absolute URLs of PDF documents
    pub pdfs: Vec<String>,

    /// Absolute URLs of plain-text documents
    pub texts: Vec<String>,

    /// Every URL a fetch was attempted for, in visit order
    pub visited_pages: Vec<String>,

    /// Page text in completion order
    pub extracted_content: Vec<PageRecord>,
}

impl CrawlManifest {
    /// Looks up the record extracted for a URL
    pub fn content_for(&self, url: &str) -> Option<&PageRecord> {
        self.extracted_content.iter().find(|record| record.url == url)
    }
}
