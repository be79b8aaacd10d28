//! End-of-run crawl statistics
//!
//! This module summarizes a finished crawl for logging and for callers that
//! want more than the manifest itself.

use std::fmt;
use std::time::Duration;

/// Why a crawl run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No unvisited page links remain
    FrontierExhausted,

    /// The page limit was reached
    BudgetReached,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontierExhausted => write!(f, "frontier exhausted"),
            Self::BudgetReached => write!(f, "page budget reached"),
        }
    }
}

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Pages a fetch was attempted for
    pub pages_visited: usize,

    /// Pages whose content was extracted
    pub pages_extracted: usize,

    /// Pages that failed to fetch or parse
    pub pages_failed: usize,

    /// PDF documents discovered
    pub pdfs_found: usize,

    /// Plain-text documents discovered
    pub texts_found: usize,

    /// Batches dispatched after the seed page
    pub batches: usize,

    /// Manifest writes that failed
    pub write_failures: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,

    /// What ended the run
    pub stop_reason: StopReason,
}

impl CrawlStatistics {
    /// Returns the extraction success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_visited == 0 {
            return 0.0;
        }
        (self.pages_extracted as f64 / self.pages_visited as f64) * 100.0
    }

    /// Logs the summary through tracing
    pub fn log_summary(&self) {
        tracing::info!(
            "Crawl finished ({}): {} pages visited, {} extracted, {} failed ({:.1}% success) in {:.2?}",
            self.stop_reason,
            self.pages_visited,
            self.pages_extracted,
            self.pages_failed,
            self.success_rate(),
            self.elapsed
        );
        tracing::info!(
            "Found {} PDF and {} text documents across {} batches",
            self.pdfs_found,
            self.texts_found,
            self.batches
        );
        if self.write_failures > 0 {
            tracing::warn!("{} manifest writes failed during the run", self.write_failures);
        }
    }
}
