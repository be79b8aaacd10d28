use std::collections::HashSet;

/// A deduplicated collection of URLs that remembers insertion order
///
/// Membership checks go through a hash set while a parallel vector keeps the
/// order entries were first seen in, which is the order they are serialized
/// in. Entries are never removed.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    members: HashSet<String>,
    order: Vec<String>,
}

impl OrderedSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a URL, returning true if it was not already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.members.contains(&url) {
            return false;
        }

        self.members.insert(url.clone());
        self.order.push(url);
        true
    }

    /// Returns true if the URL is in the set
    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    /// Returns the number of URLs in the set
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the set is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the URLs in insertion order
    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    /// Copies the URLs out in insertion order
    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}
