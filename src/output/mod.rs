//! Output module for persisting crawl results
//!
//! This module handles:
//! - The crawl manifest data model consumed by the downloader
//! - Atomic, whole-file manifest writes after every batch
//! - End-of-run crawl statistics

mod manifest;
pub mod stats;
mod writer;

pub use manifest::{CrawlManifest, PageRecord};
pub use stats::{CrawlStatistics, StopReason};
pub use writer::{ManifestWriter, DEFAULT_MANIFEST_PATH};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
