//! Query-time retrieval: embed the query, match against the store.
//!
//! A failed query embedding yields an empty result set rather than an
//! error; the caller sees "no context" and can still answer without
//! retrieved documents.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::traits::{Ai, DocumentStore};
use crate::types::{MatchResult, RetrievalConfig};

/// Retrieve the documents most similar to a free-text query.
///
/// Results are ordered by similarity descending, include only rows at
/// or above `config.threshold`, and are capped at `config.top_k`.
pub async fn retrieve<A, S>(
    query: &str,
    config: &RetrievalConfig,
    ai: &A,
    store: &S,
) -> Result<Vec<MatchResult>, StoreError>
where
    A: Ai + ?Sized,
    S: DocumentStore + ?Sized,
{
    let embedding = match ai.embed(query).await {
        Ok(embedding) => embedding,
        Err(e) => {
            warn!(error = %e, "Failed to embed query, returning no matches");
            return Ok(Vec::new());
        }
    };

    let matches = store
        .match_documents(&embedding, config.threshold, config.top_k)
        .await?;

    debug!(
        query_len = query.len(),
        matches = matches.len(),
        threshold = config.threshold,
        "Retrieval completed"
    );

    Ok(matches)
}
