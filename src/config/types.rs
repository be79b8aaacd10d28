use crate::output::DEFAULT_MANIFEST_PATH;
use serde::Deserialize;

/// Main configuration structure for Site-Harvest
///
/// Every section and key is optional; missing values take the defaults
/// below, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub download: DownloadConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum number of pages a single run may attempt to fetch
    pub page_limit: usize,

    /// Number of pages fetched concurrently per batch
    pub batch_size: usize,

    /// Total time allowed for one request (seconds)
    pub request_timeout_secs: u64,

    /// Time allowed for establishing a connection (seconds)
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Strip `<header>` regions before extracting page text
    pub exclude_header: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_limit: 50,
            batch_size: 10,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("site-harvest/{}", env!("CARGO_PKG_VERSION")),
            exclude_header: false,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the crawl manifest
    pub manifest_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            manifest_path: DEFAULT_MANIFEST_PATH.to_string(),
        }
    }
}

/// Downloader target directories
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DownloadConfig {
    /// Directory receiving PDF documents
    pub pdf_dir: String,

    /// Directory receiving plain-text documents
    pub txt_dir: String,

    /// Directory receiving extracted page text
    pub content_dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            pdf_dir: "./pdf".to_string(),
            txt_dir: "./txt".to_string(),
            content_dir: "./content".to_string(),
        }
    }
}
