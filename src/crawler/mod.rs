//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML parsing, content extraction, and link collection
//! - Batched, budget-aware crawl coordination

mod collector;
mod coordinator;
mod extract;
mod fetcher;
mod parser;

pub use collector::{Discovered, LinkCollector};
pub use coordinator::{Coordinator, CrawlReport};
pub use extract::{extract_page_content, minify, remove_headers};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page, FetchedPage};
pub use parser::{is_html_content_type, parse_html, parse_page};

use crate::config::Config;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed URL and build the HTTP client
/// 2. Fetch the seed page and collect its links
/// 3. Crawl same-domain pages in batches up to the page limit
/// 4. Persist the manifest after every batch
///
/// # Arguments
///
/// * `seed_url` - The absolute URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed (possibly with per-page failures)
/// * `Err(HarvestError)` - Invalid seed or the seed page could not be processed
///
/// # Example
///
/// ```no_run
/// use site_harvest::config::Config;
/// use site_harvest::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = crawl("https://example.com/", &Config::default()).await?;
/// println!("Visited {} pages", report.statistics.pages_visited);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, config: &Config) -> Result<CrawlReport, HarvestError> {
    let coordinator = Coordinator::new(seed_url, config)?;
    coordinator.run().await
}
