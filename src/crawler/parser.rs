//! HTML parsing for fetched pages
//!
//! Parsing itself never fails with html5ever; the failure mode here is a
//! response that is not an HTML document at all.

use crate::crawler::FetchedPage;
use crate::HarvestError;
use scraper::Html;

/// Content types accepted as HTML documents
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Returns true if a Content-Type header denotes an HTML document
///
/// A missing header is given the benefit of the doubt.
pub fn is_html_content_type(content_type: Option<&str>) -> bool {
    let Some(content_type) = content_type else {
        return true;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    HTML_CONTENT_TYPES.contains(&mime.as_str())
}

/// Rejects responses whose Content-Type is not HTML
///
/// Called on the response headers, so a rejected body is never downloaded.
pub fn ensure_html(url: &str, content_type: Option<&str>) -> Result<(), HarvestError> {
    if is_html_content_type(content_type) {
        return Ok(());
    }

    Err(HarvestError::Parse {
        url: url.to_string(),
        message: format!("Expected HTML, got {}", content_type.unwrap_or("unknown")),
    })
}

/// Parses a fetched page into a document
///
/// # Returns
///
/// * `Ok(Html)` - The parsed document
/// * `Err(HarvestError::Parse)` - The response is not HTML
pub fn parse_page(url: &str, page: &FetchedPage) -> Result<Html, HarvestError> {
    ensure_html(url, page.content_type.as_deref())?;
    Ok(parse_html(&page.body))
}

/// Parses an HTML string into a document
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}
