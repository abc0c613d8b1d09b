//! Crawl a website and index its pages into Postgres.
//!
//! ```text
//! crawl --url=https://example.com [--max-pages=100] [--delay-ms=500]
//! ```
//!
//! Environment:
//! - `LLM_API_KEY` (required): API key for the LLM service
//! - `LLM_BASE_URL` (optional): OpenAI-compatible base URL
//! - `DATABASE_URL` (required): Postgres connection string

use anyhow::{Context, Result};
use llm_client::LlmClient;
use siteindex::{crawl, CrawlConfig, HttpFetcher, OpenAiService, PostgresStore};
use tracing_subscriber::EnvFilter;

struct Args {
    url: String,
    max_pages: Option<usize>,
    delay_ms: Option<u64>,
}

fn parse_args() -> Option<Args> {
    let mut url = None;
    let mut max_pages = None;
    let mut delay_ms = None;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--url=") {
            url = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--max-pages=") {
            max_pages = value.parse().ok();
        } else if let Some(value) = arg.strip_prefix("--delay-ms=") {
            delay_ms = value.parse().ok();
        }
    }

    url.map(|url| Args {
        url,
        max_pages,
        delay_ms,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let Some(args) = parse_args() else {
        eprintln!("Usage: crawl --url=<start-url> [--max-pages=N] [--delay-ms=N]");
        std::process::exit(1);
    };

    let api_key = std::env::var("LLM_API_KEY").context("LLM_API_KEY not set")?;
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

    let mut client = LlmClient::new(api_key);
    if let Ok(base_url) = std::env::var("LLM_BASE_URL") {
        client = client.with_base_url(base_url);
    }

    let ai = OpenAiService::new(client);
    let fetcher = HttpFetcher::new();
    let store = PostgresStore::new(&database_url)
        .await
        .context("Failed to connect to document store")?;

    let mut config = CrawlConfig::new();
    if let Some(max) = args.max_pages {
        config = config.with_max_pages(max);
    }
    if let Some(delay) = args.delay_ms {
        config = config.with_delay_ms(delay);
    }

    let report = crawl(&args.url, &config, &fetcher, &ai, &store)
        .await
        .context("Crawl failed")?;

    println!("Crawl complete:");
    println!("  Pages fetched: {}", report.pages_fetched);
    println!("  Pages indexed: {}", report.pages_indexed);
    println!("  Skipped (too short): {}", report.pages_skipped_short);
    if !report.failed.is_empty() {
        println!("  Failed ({}):", report.failed.len());
        for url in &report.failed {
            println!("    {}", url);
        }
    }

    Ok(())
}
