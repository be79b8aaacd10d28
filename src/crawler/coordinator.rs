//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Deriving the origin and domain from the seed URL
//! - Managing the frontier and the visited set
//! - Dispatching bounded-size batches of concurrent fetches
//! - Coordinating parsing, content extraction, and link collection
//! - Persisting the manifest after the seed page and after every batch

use crate::config::{validate, Config, CrawlerConfig};
use crate::crawler::collector::LinkCollector;
use crate::crawler::extract::{extract_page_content, minify};
use crate::crawler::parser::parse_page;
use crate::crawler::{build_http_client, fetch_page, FetchedPage};
use crate::output::{CrawlManifest, CrawlStatistics, ManifestWriter, PageRecord, StopReason};
use crate::state::{Frontier, VisitedSet};
use crate::url::{extract_domain, extract_origin, parse_target};
use crate::{HarvestError, UrlError};
use futures::future::join_all;
use reqwest::Client;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Outcome of an attempt to reserve a URL for fetching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    /// The URL is now marked visited and must be fetched by the caller
    Claimed,
    /// Another task already reserved the URL
    AlreadyVisited,
    /// The page limit has been reached
    BudgetExhausted,
}

/// Mutable state shared by the concurrent tasks of one crawl run
#[derive(Debug)]
struct CrawlState {
    visited: VisitedSet,
    frontier: Frontier,
    collector: LinkCollector,
    pages: Vec<PageRecord>,
    failures: usize,
}

impl CrawlState {
    /// Marks `url` visited unless it already is or the budget is spent
    ///
    /// Checking and marking happen under one lock so two tasks can never
    /// both claim the same URL.
    fn claim(&mut self, url: &str, limit: usize) -> Claim {
        if self.visited.contains(url) {
            Claim::AlreadyVisited
        } else if self.visited.len() >= limit {
            Claim::BudgetExhausted
        } else {
            self.visited.insert(url);
            Claim::Claimed
        }
    }

    fn snapshot(&self) -> CrawlManifest {
        CrawlManifest {
            pdfs: self.collector.resources().pdfs().to_vec(),
            texts: self.collector.resources().texts().to_vec(),
            visited_pages: self.visited.to_vec(),
            extracted_content: self.pages.clone(),
        }
    }
}

/// Final manifest and statistics of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub manifest: CrawlManifest,
    pub statistics: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// A coordinator owns the state of exactly one crawl run; [`Coordinator::run`]
/// consumes it.
pub struct Coordinator {
    config: CrawlerConfig,
    seed: String,
    client: Client,
    writer: ManifestWriter,
    state: Mutex<CrawlState>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Absolute http(s) URL the crawl starts from
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Invalid seed URL, invalid configuration, or HTTP client failure
    pub fn new(seed_url: &str, config: &Config) -> Result<Self, HarvestError> {
        validate(config)?;

        let seed =
            parse_target(seed_url).ok_or_else(|| UrlError::Parse(seed_url.to_string()))?;
        let origin = extract_origin(&seed)?;
        let domain =
            extract_domain(&seed).ok_or_else(|| UrlError::MissingHost(seed_url.to_string()))?;

        let client = build_http_client(&config.crawler)?;

        tracing::debug!("Seed origin {}, domain {}", origin, domain);

        Ok(Self {
            config: config.crawler.clone(),
            seed: seed.to_string(),
            client,
            writer: ManifestWriter::new(&config.output.manifest_path),
            state: Mutex::new(CrawlState {
                visited: VisitedSet::new(),
                frontier: Frontier::new(),
                collector: LinkCollector::new(origin, domain),
                pages: Vec::new(),
                failures: 0,
            }),
        })
    }

    /// The canonical form of the seed URL
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Returns a copy of everything found so far
    pub fn manifest(&self) -> CrawlManifest {
        self.state().snapshot()
    }

    /// Runs the crawl to completion
    ///
    /// This is the core crawling logic that:
    /// 1. Fetches the seed page and seeds the frontier from its links
    /// 2. Drains the frontier in batches of concurrent fetches
    /// 3. Writes the manifest after the seed and after every batch
    /// 4. Stops when the frontier is exhausted or the page limit is reached
    ///
    /// Only a failure on the seed page aborts the run; every other page
    /// failure is logged and counted.
    pub async fn run(self) -> Result<CrawlReport, HarvestError> {
        let start_time = Instant::now();
        let limit = self.config.page_limit;

        tracing::info!(
            "Starting crawl of {} (page limit {}, batch size {})",
            self.seed,
            limit,
            self.config.batch_size
        );

        self.process_seed().await?;

        let mut write_failures = 0;
        if !self.save_manifest().await {
            write_failures += 1;
        }

        let mut batches = 0;
        let stop_reason = loop {
            let batch = {
                let mut state = self.state();
                let remaining = limit.saturating_sub(state.visited.len());
                if remaining == 0 {
                    break StopReason::BudgetReached;
                }

                let CrawlState {
                    frontier, visited, ..
                } = &mut *state;
                frontier.next_batch(self.config.batch_size.min(remaining), visited)
            };

            if batch.is_empty() {
                break StopReason::FrontierExhausted;
            }

            batches += 1;
            tracing::info!("Batch {}: processing {} pages", batches, batch.len());

            join_all(batch.iter().map(|url| self.process_url(url))).await;

            if !self.save_manifest().await {
                write_failures += 1;
            }

            let (visited, queued) = {
                let state = self.state();
                (state.visited.len(), state.frontier.len())
            };
            tracing::info!(
                "Batch {} complete: {} pages visited, {} in frontier",
                batches,
                visited,
                queued
            );
        };

        let manifest = self.manifest();
        let failures = self.state().failures;

        let statistics = CrawlStatistics {
            pages_visited: manifest.visited_pages.len(),
            pages_extracted: manifest.extracted_content.len(),
            pages_failed: failures,
            pdfs_found: manifest.pdfs.len(),
            texts_found: manifest.texts.len(),
            batches,
            write_failures,
            elapsed: start_time.elapsed(),
            stop_reason,
        };

        Ok(CrawlReport {
            manifest,
            statistics,
        })
    }

    /// Fetches the seed page; any failure here is fatal
    async fn process_seed(&self) -> Result<(), HarvestError> {
        let seed = self.seed.clone();
        let seed_error = |source: HarvestError| HarvestError::SeedFetch {
            url: seed.clone(),
            source: Box::new(source),
        };

        // Validation guarantees page_limit >= 1 and the visited set starts empty
        let claim = self.state().claim(&seed, self.config.page_limit);
        debug_assert_eq!(claim, Claim::Claimed);

        tracing::info!("Collecting initial links from {}", seed);
        let page = fetch_page(&self.client, &seed).await.map_err(seed_error)?;
        self.absorb(&seed, &page).map_err(seed_error)?;

        let state = self.state();
        tracing::info!(
            "Seed page yielded {} page links, {} PDFs, {} text documents",
            state.frontier.len(),
            state.collector.resources().pdfs().len(),
            state.collector.resources().texts().len()
        );

        Ok(())
    }

    /// Processes a single URL
    ///
    /// This method is idempotent: a URL that is already visited, or that
    /// arrives after the budget is spent, is skipped without a fetch.
    async fn process_url(&self, url: &str) {
        let claim = self.state().claim(url, self.config.page_limit);
        match claim {
            Claim::Claimed => {}
            Claim::AlreadyVisited => {
                tracing::debug!("Skipping already visited {}", url);
                return;
            }
            Claim::BudgetExhausted => {
                tracing::debug!("Page limit reached, not fetching {}", url);
                return;
            }
        }

        tracing::info!("Processing: {}", url);

        let result = match fetch_page(&self.client, url).await {
            Ok(page) => self.absorb(url, &page),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            tracing::warn!("Failed to process {}: {}", url, e);
            self.state().failures += 1;
        }
    }

    /// Parses a fetched page and merges its content and links into the run
    fn absorb(&self, url: &str, page: &FetchedPage) -> Result<(), HarvestError> {
        let document = parse_page(url, page)?;
        let content = minify(extract_page_content(&document, self.config.exclude_header).as_str());

        let mut state = self.state();
        let discovered = state.collector.collect(&document);

        tracing::debug!(
            "{}: {} new page links, {} new PDFs, {} new text documents",
            url,
            discovered.pages.len(),
            discovered.pdfs,
            discovered.texts
        );

        state.frontier.extend(discovered.pages);
        state.pages.push(PageRecord::new(url, content));

        Ok(())
    }

    /// Writes a snapshot of the current state; returns false on failure
    async fn save_manifest(&self) -> bool {
        let manifest = self.manifest();

        match self.writer.write(&manifest).await {
            Ok(()) => {
                tracing::info!(
                    "Results saved to {} ({} pages visited)",
                    self.writer.path().display(),
                    manifest.visited_pages.len()
                );
                true
            }
            Err(e) => {
                tracing::error!("Failed to save results: {}", e);
                false
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, CrawlState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
