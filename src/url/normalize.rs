use url::Url;

/// Resolves a link reference against the seed origin
///
/// Root-relative references (starting with `/`) are appended to `base_origin`;
/// anything else is returned unchanged. Dot segments and protocol-relative
/// references are not resolved here, so the result must still pass
/// [`parse_target`] before it is used.
///
/// # Examples
///
/// ```
/// use site_harvest::url::normalize_url;
///
/// assert_eq!(normalize_url("/x", "http://a.com"), "http://a.com/x");
/// assert_eq!(normalize_url("http://b.com/x", "http://a.com"), "http://b.com/x");
/// ```
pub fn normalize_url(reference: &str, base_origin: &str) -> String {
    if reference.starts_with('/') {
        format!("{}{}", base_origin, reference)
    } else {
        reference.to_string()
    }
}

/// Parses a string into a crawl target
///
/// Returns `None` unless the string is a well-formed absolute URL with both a
/// scheme and a host. Malformed input is expected from real pages, so it is
/// reported as `None` instead of an error.
pub fn parse_target(candidate: &str) -> Option<Url> {
    let url = Url::parse(candidate).ok()?;

    if url.has_host() && url.host_str().is_some_and(|h| !h.is_empty()) {
        Some(url)
    } else {
        None
    }
}

/// Returns true if the string is a syntactically valid absolute URL
pub fn is_valid_url(candidate: &str) -> bool {
    parse_target(candidate).is_some()
}
