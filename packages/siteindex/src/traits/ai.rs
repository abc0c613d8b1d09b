//! AI trait for the two delegated LLM operations.

use async_trait::async_trait;

use crate::error::{EmbedError, NormalizeError};

/// The opaque LLM service the pipeline depends on.
///
/// Implementations wrap a concrete provider and handle prompting and
/// response parsing. Both calls must be bounded by a timeout; both are
/// used with graceful degradation (organize falls back to raw text,
/// a missing embedding skips the document).
#[async_trait]
pub trait Ai: Send + Sync {
    /// Organize raw page text into a structured, concise document.
    ///
    /// The first line of the returned text is used as the document
    /// title.
    async fn organize(&self, raw_text: &str, url: &str) -> Result<String, NormalizeError>;

    /// Generate a fixed-dimension embedding for text.
    ///
    /// Used both at index time and at query time; the dimension must
    /// not vary between calls against the same store.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}
