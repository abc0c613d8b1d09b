//! Typed errors for the indexing pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Every variant
//! here is recoverable per item: a failed page is logged and skipped,
//! never fatal to the crawl or to a retrieval call.

use thiserror::Error;

/// Errors raised while fetching a single page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed or has no origin.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Navigation or transfer failed (connection, non-2xx, body read).
    #[error("fetch failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The page did not settle within the configured timeout.
    #[error("timeout fetching {url}")]
    Timeout { url: String },

    /// The rendering context crashed or refused the page.
    #[error("render failed for {url}: {message}")]
    Render { url: String, message: String },
}

/// Errors raised by the organize-service call.
///
/// Callers fall back to the raw text on any of these; indexing of a
/// fetchable page is never aborted by a normalization failure.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Service call failed (network, non-2xx, timeout).
    #[error("organize service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but had no usable content.
    #[error("malformed organize response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the embedding-service call.
///
/// "No embedding" means "do not index this document" at index time and
/// "empty context" at query time. A placeholder vector is never
/// substituted.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Service call failed (network, non-2xx, timeout).
    #[error("embedding service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but carried no vector.
    #[error("malformed embedding response: {0}")]
    MalformedResponse(String),
}

/// Errors raised by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach or open the backend.
    #[error("store connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A query or insert failed.
    #[error("store query error: {0}")]
    Query(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Embedding length differs from the store's fixed dimension.
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Umbrella error for pipeline entry points.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("embed error: {0}")]
    Embed(#[from] EmbedError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The crawl entry point was handed a URL it cannot start from.
    #[error("invalid start URL: {url}")]
    InvalidStartUrl { url: String },
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;
