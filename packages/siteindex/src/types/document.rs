//! Persisted document and retrieval result types.

use serde::{Deserialize, Serialize};

/// The persisted unit: organized content plus its embedding.
///
/// Immutable once inserted; the store owns it exclusively after
/// `insert`. The embedding length must be constant across every
/// document in one store, since mixing models breaks similarity
/// comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document title (first line of the organized text, or the URL).
    pub title: String,

    /// Source URL; `None` for documents from non-crawled sources.
    pub url: Option<String>,

    /// Organized content, or the raw text when organization failed.
    pub content: String,

    /// Dense embedding vector, dimension fixed by the embedding model.
    pub embedding: Vec<f32>,
}

impl Document {
    /// Create a new document.
    pub fn new(
        title: impl Into<String>,
        url: Option<String>,
        content: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            title: title.into(),
            url,
            content: content.into(),
            embedding,
        }
    }

    /// Embedding dimension.
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// One retrieval hit, produced per query and ranked by similarity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Store-assigned row id.
    pub id: i64,

    /// Document content usable as conversational context.
    pub content: String,

    /// Cosine similarity to the query embedding, in [0, 1].
    pub similarity: f32,
}
