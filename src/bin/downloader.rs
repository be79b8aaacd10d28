//! Downloader entry point
//!
//! Reads the crawl manifest produced by `site-harvest` and stores the PDF
//! and text documents it lists, plus the extracted text of every page.

use clap::Parser;
use site_harvest::config::{load_config_or_default, DEFAULT_CONFIG_PATH};
use site_harvest::crawler::build_http_client;
use site_harvest::download::Downloader;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Downloads the resources listed in scraping-results.json
#[derive(Parser, Debug)]
#[command(name = "downloader")]
#[command(version)]
#[command(about = "Materializes a Site-Harvest crawl manifest", long_about = None)]
struct Cli {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("site_harvest=info,downloader=info,warn"))
        .with_target(false)
        .init();

    let config = load_config_or_default(Path::new(DEFAULT_CONFIG_PATH))?;
    let client = build_http_client(&config.crawler)?;

    let downloader = Downloader::new(config.download.clone(), client);
    downloader.init().await?;

    match downloader
        .process_manifest(Path::new(&config.output.manifest_path))
        .await
    {
        Ok(report) => {
            tracing::info!(
                "Download completed: {} documents, {} pages saved, {} failures",
                report.downloaded,
                report.saved,
                report.failed
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Error processing results: {}", e);
            Err(e.into())
        }
    }
}
