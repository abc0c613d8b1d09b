//! Domain types for the crawl-and-index pipeline.

pub mod config;
pub mod document;
pub mod page;

pub use config::{CrawlConfig, RetrievalConfig};
pub use document::{Document, MatchResult};
pub use page::Page;
