use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// The `url` crate already lowercases hosts of special schemes, so the
/// returned value can be compared directly.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_harvest::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.com:8080/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Extracts the origin (`scheme://host[:port]`) used to resolve
/// root-relative links
///
/// # Returns
///
/// * `Ok(String)` - The serialized origin, without a trailing slash
/// * `Err(UrlError)` - The URL is not an http(s) URL with a host
pub fn extract_origin(url: &Url) -> UrlResult<String> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if !url.has_host() {
        return Err(UrlError::MissingHost(url.to_string()));
    }

    Ok(url.origin().ascii_serialization())
}

/// Returns true if the URL's host equals `domain` exactly
///
/// Subdomains do not match and the scheme and port are ignored. Unparsable
/// URLs are never on the same domain.
pub fn is_same_domain(url: &str, domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str() == Some(domain),
        Err(_) => false,
    }
}
