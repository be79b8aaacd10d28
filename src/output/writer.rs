//! Manifest persistence
//!
//! Writes go to a sibling temporary file which is then renamed over the
//! manifest, so a reader never observes a half-written document.

use crate::output::{CrawlManifest, OutputError, OutputResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Well-known manifest location read by the downloader
pub const DEFAULT_MANIFEST_PATH: &str = "scraping-results.json";

/// Serializes crawl manifests to a fixed path
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    path: PathBuf,
}

impl ManifestWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the manifest file with `manifest`
    ///
    /// The previous contents are discarded entirely. On failure the old file
    /// (if any) is left in place and the error is returned to the caller.
    pub async fn write(&self, manifest: &CrawlManifest) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, json.as_bytes())
            .await
            .map_err(|source| io_error(&temp_path, source))?;

        if let Err(source) = tokio::fs::rename(&temp_path, &self.path).await {
            tokio::fs::remove_file(&temp_path).await.ok();
            return Err(io_error(&self.path, source));
        }

        tracing::debug!(
            "Wrote manifest to {} ({} pages)",
            self.path.display(),
            manifest.visited_pages.len()
        );

        Ok(())
    }

    /// Reads a manifest previously written to `path`
    pub async fn load(path: &Path) -> OutputResult<CrawlManifest> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| io_error(path, source))?;

        Ok(serde_json::from_str(&content)?)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(DEFAULT_MANIFEST_PATH));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new(DEFAULT_MANIFEST_PATH)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> OutputError {
    OutputError::Io {
        path: path.display().to_string(),
        source,
    }
}
