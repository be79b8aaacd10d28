//! Downloader for crawl manifests
//!
//! This module materializes what a crawl found:
//! - PDF and plain-text documents are fetched and stored as raw bytes
//! - Extracted page text is written to one file per page
//!
//! Each item is independent; a failed download is logged and skipped.

use crate::config::DownloadConfig;
use crate::crawler::fetch_bytes;
use crate::output::{ManifestWriter, PageRecord};
use crate::HarvestError;
use reqwest::Client;
use std::path::{Path, PathBuf};
use url::Url;

/// Counts of what a manifest run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    /// Documents fetched and written
    pub downloaded: usize,

    /// Page texts written
    pub saved: usize,

    /// Items that could not be fetched or written
    pub failed: usize,
}

/// Fetches manifest resources into the configured directories
pub struct Downloader {
    config: DownloadConfig,
    client: Client,
}

impl Downloader {
    pub fn new(config: DownloadConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Creates the target directories
    pub async fn init(&self) -> Result<(), HarvestError> {
        for dir in [
            &self.config.pdf_dir,
            &self.config.txt_dir,
            &self.config.content_dir,
        ] {
            tokio::fs::create_dir_all(dir).await?;
        }
        Ok(())
    }

    /// Downloads everything listed in the manifest at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(DownloadReport)` - The manifest was processed; individual items may have failed
    /// * `Err(HarvestError)` - The manifest could not be read or parsed
    pub async fn process_manifest(&self, path: &Path) -> Result<DownloadReport, HarvestError> {
        let manifest = ManifestWriter::load(path).await?;
        let mut report = DownloadReport::default();

        tracing::info!(
            "Manifest lists {} PDFs, {} text documents, {} pages",
            manifest.pdfs.len(),
            manifest.texts.len(),
            manifest.extracted_content.len()
        );

        let documents = manifest
            .pdfs
            .iter()
            .map(|url| (url, &self.config.pdf_dir))
            .chain(manifest.texts.iter().map(|url| (url, &self.config.txt_dir)));

        for (url, dir) in documents {
            match self.download_file(url, Path::new(dir)).await {
                Ok(written) => {
                    tracing::info!("Downloaded: {}", written.display());
                    report.downloaded += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to download {}: {}", url, e);
                    report.failed += 1;
                }
            }
        }

        for record in &manifest.extracted_content {
            match self.save_content(record).await {
                Ok(written) => {
                    tracing::info!("Saved content: {}", written.display());
                    report.saved += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to save content for {}: {}", record.url, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Fetches `url` into `dir`, named after its last path segment
    async fn download_file(&self, url: &str, dir: &Path) -> Result<PathBuf, HarvestError> {
        let bytes = fetch_bytes(&self.client, url).await?;
        let target = dir.join(file_name_for(url));
        tokio::fs::write(&target, bytes).await?;

        Ok(target)
    }

    async fn save_content(&self, record: &PageRecord) -> Result<PathBuf, HarvestError> {
        let target =
            Path::new(&self.config.content_dir).join(format!("{}.txt", file_name_for(&record.url)));
        tokio::fs::write(&target, record.content.as_bytes()).await?;

        Ok(target)
    }
}

/// Derives a safe local file name from a URL
///
/// Uses the last non-empty path segment (`index` when there is none) and
/// replaces every character outside `[A-Za-z0-9.-]` with `_`.
///
/// # Examples
///
/// ```
/// use site_harvest::download::file_name_for;
///
/// assert_eq!(file_name_for("https://a.com/docs/Annual Report.pdf"), "Annual_20Report.pdf");
/// assert_eq!(file_name_for("https://a.com/"), "index");
/// ```
pub fn file_name_for(url: &str) -> String {
    let segment = Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path()
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "index".to_string());

    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
