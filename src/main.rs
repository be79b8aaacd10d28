//! Site-Harvest main entry point
//!
//! This is the command-line interface for the Site-Harvest crawler.

use clap::Parser;
use site_harvest::config::{load_config_or_default, Config, DEFAULT_CONFIG_PATH};
use site_harvest::crawler::crawl;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Site-Harvest: a same-domain crawler
///
/// Crawls every page reachable from the seed URL on the seed's host,
/// extracts page text, records linked PDF and text documents, and keeps
/// scraping-results.json up to date after every batch.
#[derive(Parser, Debug)]
#[command(name = "site-harvest")]
#[command(version)]
#[command(about = "A same-domain crawler that builds a crawl manifest", long_about = None)]
struct Cli {
    /// Absolute URL to start crawling from
    #[arg(value_name = "SEED_URL")]
    seed_url: String,

    /// Leave <header> regions out of the extracted page text
    #[arg(long)]
    skip_header: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging();

    let mut config = match load_config_or_default(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    apply_cli_overrides(&cli, &mut config);

    tracing::info!(
        "Crawling {} (header regions {})",
        cli.seed_url,
        if config.crawler.exclude_header {
            "excluded"
        } else {
            "included"
        }
    );

    match crawl(&cli.seed_url, &config).await {
        Ok(report) => {
            report.statistics.log_summary();
            tracing::info!("Manifest written to {}", config.output.manifest_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Applies command-line flags on top of the file configuration
fn apply_cli_overrides(cli: &Cli, config: &mut Config) {
    if cli.skip_header {
        config.crawler.exclude_header = true;
    }
}

/// Sets up the logging/tracing subscriber
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("site_harvest=info,warn"))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
