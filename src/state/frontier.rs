use crate::state::VisitedSet;
use std::collections::{HashSet, VecDeque};

/// FIFO queue of page URLs awaiting a fetch attempt
///
/// The frontier does not deduplicate against itself; entries that have been
/// visited by the time they reach the front are dropped while draining.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL to the back of the queue
    pub fn push(&mut self, url: impl Into<String>) {
        self.queue.push_back(url.into());
    }

    /// Returns the number of queued entries, including stale ones
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes up to `max` unvisited URLs from the front of the queue
    ///
    /// Entries already in `visited`, and repeats within the same batch, are
    /// discarded without counting toward `max`.
    pub fn next_batch(&mut self, max: usize, visited: &VisitedSet) -> Vec<String> {
        let mut batch = Vec::with_capacity(max);
        let mut in_batch = HashSet::new();

        while batch.len() < max {
            let Some(url) = self.queue.pop_front() else {
                break;
            };

            if visited.contains(&url) || !in_batch.insert(url.clone()) {
                continue;
            }

            batch.push(url);
        }

        batch
    }
}

impl Extend<String> for Frontier {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.queue.extend(iter);
    }
}
