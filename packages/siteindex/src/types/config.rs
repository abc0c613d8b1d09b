//! Configuration for crawl and retrieval operations.
//!
//! These were hardcoded constants in early revisions; they are explicit
//! configuration now so deployments can tune pacing and thresholds
//! without rebuilding.

use serde::{Deserialize, Serialize};

/// Configuration for one crawl run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Delay between outbound page requests in milliseconds
    /// (politeness pacing, measured per request).
    pub delay_ms: u64,

    /// Pages whose extracted text is this long or shorter are not
    /// indexed (error pages, empty shells). Their links are still
    /// followed.
    pub min_content_len: usize,

    /// Optional cap on the number of pages fetched in one run.
    /// `None` crawls until the frontier is exhausted.
    pub max_pages: Option<usize>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            delay_ms: 500,
            min_content_len: 50,
            max_pages: None,
        }
    }
}

impl CrawlConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inter-request delay.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Set the minimum content length for indexing.
    pub fn with_min_content_len(mut self, len: usize) -> Self {
        self.min_content_len = len;
        self
    }

    /// Cap the number of pages fetched.
    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

/// Configuration for retrieval calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Minimum cosine similarity for a document to be returned.
    pub threshold: f32,

    /// Maximum number of results.
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            threshold: 0.78,
            top_k: 5,
        }
    }
}

impl RetrievalConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the result cap.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crawl_config_defaults() {
        let config = CrawlConfig::default();
        assert_eq!(config.delay_ms, 500);
        assert_eq!(config.min_content_len, 50);
        assert!(config.max_pages.is_none());
    }

    #[test]
    fn retrieval_config_builder() {
        let config = RetrievalConfig::new().with_threshold(0.5).with_top_k(10);
        assert!((config.threshold - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.top_k, 10);
    }
}
