//! Retrieve indexed documents similar to a query.
//!
//! ```text
//! retrieve --query="opening hours" [--threshold=0.78] [--top-k=5]
//! ```
//!
//! Environment:
//! - `LLM_API_KEY` (required): API key for the LLM service
//! - `LLM_BASE_URL` (optional): OpenAI-compatible base URL
//! - `DATABASE_URL` (required): Postgres connection string

use anyhow::{Context, Result};
use llm_client::LlmClient;
use siteindex::{retrieve, OpenAiService, PostgresStore, RetrievalConfig};
use tracing_subscriber::EnvFilter;

struct Args {
    query: String,
    threshold: Option<f32>,
    top_k: Option<usize>,
}

fn parse_args() -> Option<Args> {
    let mut query = None;
    let mut threshold = None;
    let mut top_k = None;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--query=") {
            query = Some(value.to_string());
        } else if let Some(value) = arg.strip_prefix("--threshold=") {
            threshold = value.parse().ok();
        } else if let Some(value) = arg.strip_prefix("--top-k=") {
            top_k = value.parse().ok();
        }
    }

    query.map(|query| Args {
        query,
        threshold,
        top_k,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let Some(args) = parse_args() else {
        eprintln!("Usage: retrieve --query=<text> [--threshold=N] [--top-k=N]");
        std::process::exit(1);
    };

    let api_key = std::env::var("LLM_API_KEY").context("LLM_API_KEY not set")?;
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;

    let mut client = LlmClient::new(api_key);
    if let Ok(base_url) = std::env::var("LLM_BASE_URL") {
        client = client.with_base_url(base_url);
    }

    let ai = OpenAiService::new(client);
    let store = PostgresStore::new(&database_url)
        .await
        .context("Failed to connect to document store")?;

    let mut config = RetrievalConfig::new();
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(top_k) = args.top_k {
        config = config.with_top_k(top_k);
    }

    let matches = retrieve(&args.query, &config, &ai, &store)
        .await
        .context("Retrieval failed")?;

    if matches.is_empty() {
        println!("No matches above threshold {}", config.threshold);
        return Ok(());
    }

    for m in &matches {
        println!("--- id={} similarity={:.4}", m.id, m.similarity);
        println!("{}\n", m.content);
    }

    Ok(())
}
