//! Page content extraction and whitespace minification

use regex::{Captures, Regex};
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Whitespace runs sitting directly between two tags
static INTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">[\r\n ]+<").expect("hardcoded regex pattern is valid"));

/// A tag (kept as-is) or a whitespace run (collapsed)
static TAG_OR_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<.*?>)|\s+").expect("hardcoded regex pattern is valid"));

/// Extracts the trimmed text content of a document's body
///
/// When `exclude_header` is set, `<header>` subtrees are removed from a copy
/// of the document first; the caller's document is never modified.
pub fn extract_page_content(document: &Html, exclude_header: bool) -> String {
    if exclude_header {
        let mut working = document.clone();
        remove_headers(&mut working);
        body_text(&working)
    } else {
        body_text(document)
    }
}

/// Detaches every `<header>` element from the document tree
pub fn remove_headers(document: &mut Html) {
    let Ok(selector) = Selector::parse("header") else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn body_text(document: &Html) -> String {
    let Ok(selector) = Selector::parse("body") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|body| body.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Collapses redundant whitespace
///
/// Whitespace between two tags is removed entirely, any other whitespace run
/// becomes a single space, and tag markup is left untouched. Empty or absent
/// input yields an empty string.
///
/// # Examples
///
/// ```
/// use site_harvest::crawler::minify;
///
/// assert_eq!(minify("<p>  a \n b </p>"), "<p> a b </p>");
/// assert_eq!(minify("<ul>\n  <li>x</li>\n</ul>"), "<ul><li>x</li></ul>");
/// assert_eq!(minify(None), "");
/// ```
pub fn minify<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(input) = input.into() else {
        return String::new();
    };

    if input.is_empty() {
        return String::new();
    }

    let joined = INTER_TAG_WHITESPACE.replace_all(input, "><");
    let collapsed = TAG_OR_WHITESPACE.replace_all(&joined, |caps: &Captures| match caps.get(1) {
        Some(tag) => tag.as_str().to_string(),
        None => " ".to_string(),
    });

    collapsed.trim().to_string()
}
