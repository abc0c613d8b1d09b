//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the indexing
//! pipeline without making real AI or network calls.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use url::Url;

use crate::error::{EmbedError, FetchError, FetchResult, NormalizeError};
use crate::traits::{Ai, Fetcher};
use crate::types::Page;

/// A mock AI implementation for testing.
///
/// Returns deterministic, configurable responses for both AI
/// operations. Useful for exercising pipeline logic without real LLM
/// calls.
#[derive(Default)]
pub struct MockAi {
    /// Predefined organized text by URL
    organized: Arc<RwLock<HashMap<String, String>>>,

    /// Predefined embeddings by text
    embeddings: Arc<RwLock<HashMap<String, Vec<f32>>>>,

    /// Default embedding dimension
    embedding_dim: usize,

    /// Fail every organize call
    fail_organize: bool,

    /// Fail every embed call
    fail_embed: bool,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<MockAiCall>>>,
}

/// Record of a call made to the mock AI.
#[derive(Debug, Clone)]
pub enum MockAiCall {
    Organize { url: String },
    Embed { text_len: usize },
}

impl MockAi {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self {
            embedding_dim: 1536,
            ..Default::default()
        }
    }

    /// Set the embedding dimension.
    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    /// Add predefined organized text for a URL.
    pub fn with_organized(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.organized
            .write()
            .unwrap()
            .insert(url.into(), text.into());
        self
    }

    /// Add a predefined embedding for text.
    pub fn with_embedding(self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.embeddings
            .write()
            .unwrap()
            .insert(text.into(), embedding);
        self
    }

    /// Make every organize call fail.
    pub fn with_organize_failure(mut self) -> Self {
        self.fail_organize = true;
        self
    }

    /// Make every embed call fail.
    pub fn with_embed_failure(mut self) -> Self {
        self.fail_embed = true;
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockAiCall> {
        self.calls.read().unwrap().clone()
    }

    /// Generate a deterministic embedding based on text.
    fn generate_deterministic_embedding(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        (0..self.embedding_dim)
            .map(|i| {
                let byte = hash[i % 32] as f32;
                // Normalize to [-1, 1]
                (byte / 127.5) - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Ai for MockAi {
    async fn organize(&self, _raw_text: &str, url: &str) -> Result<String, NormalizeError> {
        self.calls
            .write()
            .unwrap()
            .push(MockAiCall::Organize { url: url.to_string() });

        if self.fail_organize {
            return Err(NormalizeError::Service(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock organize failure",
            ))));
        }

        Ok(self
            .organized
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| format!("Organized page\nContent from {}", url)))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        self.calls.write().unwrap().push(MockAiCall::Embed {
            text_len: text.len(),
        });

        if self.fail_embed {
            return Err(EmbedError::Service(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "mock embed failure",
            ))));
        }

        Ok(self
            .embeddings
            .read()
            .unwrap()
            .get(text)
            .cloned()
            .unwrap_or_else(|| self.generate_deterministic_embedding(text)))
    }
}

/// A mock fetcher for testing.
///
/// Returns predefined pages without making network requests.
#[derive(Default)]
pub struct MockFetcher {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, Page>>>,

    /// URLs that should fail
    fail_urls: Arc<RwLock<HashSet<String>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create a new mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page.
    pub fn with_page(self, page: Page) -> Self {
        self.pages
            .write()
            .unwrap()
            .insert(page.url.to_string(), page);
        self
    }

    /// Add multiple predefined pages.
    pub fn with_pages(self, pages: impl IntoIterator<Item = Page>) -> Self {
        {
            let mut store = self.pages.write().unwrap();
            for page in pages {
                store.insert(page.url.to_string(), page);
            }
        }
        self
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: impl Into<String>) -> Self {
        self.fail_urls.write().unwrap().insert(url.into());
        self
    }

    /// URLs fetched, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<Page> {
        let key = url.to_string();
        self.calls.write().unwrap().push(key.clone());

        if self.fail_urls.read().unwrap().contains(&key) {
            return Err(FetchError::Http {
                url: key,
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "mock connection refused",
                )),
            });
        }

        self.pages
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(FetchError::InvalidUrl { url: key })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
