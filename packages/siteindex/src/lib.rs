//! Site indexing pipeline: crawl a site, organize its pages with an
//! LLM, embed them, and retrieve by semantic similarity.
//!
//! # Architecture
//!
//! The pipeline is built around three trait seams:
//!
//! - [`Fetcher`] loads a page and extracts text plus same-origin links
//! - [`Ai`] organizes raw text and produces embeddings
//! - [`DocumentStore`] persists documents and answers nearest-neighbor
//!   queries
//!
//! [`crawl`] walks a site breadth-first through those seams; [`retrieve`]
//! embeds a query and matches it against the store.
//!
//! # Example
//!
//! ```rust,ignore
//! use siteindex::{crawl, retrieve, CrawlConfig, RetrievalConfig};
//! use siteindex::{HttpFetcher, MemoryStore, OpenAiService};
//! use llm_client::LlmClient;
//!
//! let ai = OpenAiService::new(LlmClient::new(api_key));
//! let fetcher = HttpFetcher::new();
//! let store = MemoryStore::new();
//!
//! let report = crawl("https://example.com", &CrawlConfig::default(), &fetcher, &ai, &store).await?;
//! let matches = retrieve("opening hours", &RetrievalConfig::default(), &ai, &store).await?;
//! ```

pub mod ai;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod frontier;
pub mod normalizer;
pub mod retrieval;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

pub use ai::OpenAiService;
pub use crawler::{crawl, CrawlReport};
pub use error::{
    EmbedError, FetchError, FetchResult, IndexError, NormalizeError, Result, StoreError,
};
pub use fetcher::HttpFetcher;
pub use frontier::CrawlFrontier;
pub use normalizer::{organize_document, NormalizedDocument};
pub use retrieval::retrieve;
pub use stores::MemoryStore;
pub use traits::{cosine_similarity, Ai, DocumentStore, Fetcher};
pub use types::{CrawlConfig, Document, MatchResult, Page, RetrievalConfig};

#[cfg(feature = "browser")]
pub use fetcher::BrowserFetcher;

#[cfg(feature = "postgres")]
pub use stores::PostgresStore;
