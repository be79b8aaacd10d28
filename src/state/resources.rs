use crate::state::OrderedSet;
use crate::url::ResourceKind;

/// Downloadable documents discovered during a crawl
#[derive(Debug, Clone, Default)]
pub struct ResourceSets {
    pdfs: OrderedSet,
    texts: OrderedSet,
}

impl ResourceSets {
    /// Creates empty resource sets
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a document URL under its kind
    ///
    /// Returns true if the URL was new. Pages are not documents and are
    /// never recorded.
    pub fn insert(&mut self, kind: ResourceKind, url: &str) -> bool {
        match kind {
            ResourceKind::Pdf => self.pdfs.insert(url),
            ResourceKind::Text => self.texts.insert(url),
            ResourceKind::Page => false,
        }
    }

    pub fn pdfs(&self) -> &[String] {
        self.pdfs.as_slice()
    }

    pub fn texts(&self) -> &[String] {
        self.texts.as_slice()
    }

    /// Returns true if the URL is recorded as any kind of document
    pub fn contains(&self, url: &str) -> bool {
        self.pdfs.contains(url) || self.texts.contains(url)
    }
}
