//! URL handling module for Site-Harvest
//!
//! This module provides the pure classification functions the crawler relies
//! on: reference normalization, absolute-URL validation, same-domain checks,
//! and resource classification by file extension.

mod domain;
mod normalize;

use std::path::Path;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, extract_origin, is_same_domain};
pub use normalize::{is_valid_url, normalize_url, parse_target};

/// Resource classification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// HTML page - crawled when it is on the seed's host
    Page,
    /// PDF document - recorded for the downloader
    Pdf,
    /// Plain-text document - recorded for the downloader
    Text,
}

/// Classifies a URL by the extension of its path component
///
/// The extension is compared case-insensitively: `.pdf` is a PDF, `.txt` is
/// a text document, and everything else (including no extension) is a page.
/// Query strings and fragments do not take part in the decision.
///
/// # Examples
///
/// ```
/// use site_harvest::url::{classify_resource, ResourceKind};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/files/Report.PDF").unwrap();
/// assert_eq!(classify_resource(&url), ResourceKind::Pdf);
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(classify_resource(&url), ResourceKind::Page);
/// ```
pub fn classify_resource(url: &Url) -> ResourceKind {
    let last_segment = url.path().rsplit('/').next().unwrap_or("");

    let extension = Path::new(last_segment)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => ResourceKind::Pdf,
        Some("txt") => ResourceKind::Text,
        _ => ResourceKind::Page,
    }
}
