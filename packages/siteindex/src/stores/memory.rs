//! In-memory storage implementation for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::traits::store::{cosine_similarity, DocumentStore};
use crate::types::{Document, MatchResult};

/// In-memory document store.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart. Matching is a linear scan; fine at
/// single-site scale.
pub struct MemoryStore {
    rows: RwLock<Vec<(i64, Document)>>,
    next_id: RwLock<i64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: RwLock::new(1),
        }
    }

    /// Clear all stored documents.
    pub fn clear(&self) {
        self.rows.write().unwrap().clear();
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.rows.read().unwrap().len()
    }

    /// Look up a stored document by id.
    pub fn get(&self, id: i64) -> Option<Document> {
        self.rows
            .read()
            .unwrap()
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, doc)| doc.clone())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, doc: &Document) -> Result<i64, StoreError> {
        let mut rows = self.rows.write().unwrap();

        // Dimension is fixed by the first stored document
        if let Some((_, first)) = rows.first() {
            if first.embedding.len() != doc.embedding.len() {
                return Err(StoreError::DimensionMismatch {
                    expected: first.embedding.len(),
                    actual: doc.embedding.len(),
                });
            }
        }

        let mut next_id = self.next_id.write().unwrap();
        let id = *next_id;
        *next_id += 1;

        rows.push((id, doc.clone()));
        Ok(id)
    }

    async fn match_documents(
        &self,
        query_embedding: &[f32],
        threshold: f32,
        k: usize,
    ) -> Result<Vec<MatchResult>, StoreError> {
        let rows = self.rows.read().unwrap();

        let mut matches: Vec<MatchResult> = rows
            .iter()
            .map(|(id, doc)| MatchResult {
                id: *id,
                content: doc.content.clone(),
                similarity: cosine_similarity(query_embedding, &doc.embedding),
            })
            .filter(|m| m.similarity >= threshold)
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        matches.truncate(k);

        Ok(matches)
    }
}
