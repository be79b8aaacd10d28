//! Link collection across a whole crawl
//!
//! A single collector sees every processed page. Its sets persist between
//! calls, so each call reports only what is new to the crawl.

use crate::state::{OrderedSet, ResourceSets};
use crate::url::{classify_resource, is_same_domain, normalize_url, parse_target, ResourceKind};
use scraper::{Html, Selector};

/// What a single `collect` call added to the collector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovered {
    /// Same-domain page links not seen before, in document order
    pub pages: Vec<String>,

    /// Number of new PDF documents
    pub pdfs: usize,

    /// Number of new plain-text documents
    pub texts: usize,
}

/// Accumulates page links and documents found on crawled pages
#[derive(Debug, Clone)]
pub struct LinkCollector {
    base_origin: String,
    domain: String,
    links: OrderedSet,
    resources: ResourceSets,
}

impl LinkCollector {
    /// Creates a collector for the site at `base_origin`
    ///
    /// # Arguments
    ///
    /// * `base_origin` - Origin used to resolve root-relative hrefs
    /// * `domain` - Host that page links must match exactly
    pub fn new(base_origin: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            base_origin: base_origin.into(),
            domain: domain.into(),
            links: OrderedSet::new(),
            resources: ResourceSets::new(),
        }
    }

    /// Classifies every anchor in `document` into the collector's sets
    ///
    /// Anchors without an href, and hrefs that do not resolve to a valid
    /// absolute URL, are skipped. PDF and text documents are kept whatever
    /// their host; page links only when they are on the crawl's domain.
    pub fn collect(&mut self, document: &Html) -> Discovered {
        let mut discovered = Discovered::default();

        let Ok(selector) = Selector::parse("a") else {
            return discovered;
        };

        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            let href = href.trim();
            if href.is_empty() {
                continue;
            }

            let candidate = normalize_url(href, &self.base_origin);
            let Some(url) = parse_target(&candidate) else {
                tracing::debug!("Dropping invalid link {}", candidate);
                continue;
            };

            let kind = classify_resource(&url);
            let target = url.to_string();

            match kind {
                ResourceKind::Pdf => {
                    if self.resources.insert(kind, &target) {
                        discovered.pdfs += 1;
                    }
                }
                ResourceKind::Text => {
                    if self.resources.insert(kind, &target) {
                        discovered.texts += 1;
                    }
                }
                ResourceKind::Page => {
                    if is_same_domain(&target, &self.domain) && self.links.insert(target.clone())
                    {
                        discovered.pages.push(target);
                    }
                }
            }
        }

        discovered
    }

    /// All same-domain page links seen so far
    pub fn links(&self) -> &[String] {
        self.links.as_slice()
    }

    /// All documents seen so far
    pub fn resources(&self) -> &ResourceSets {
        &self.resources
    }
}
