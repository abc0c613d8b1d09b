//! Fetcher trait for pluggable page loading.

use async_trait::async_trait;
use url::Url;

use crate::error::FetchResult;
use crate::types::Page;

/// Loads a URL and extracts its visible text and same-origin links.
///
/// Implementations:
/// - `HttpFetcher`: plain HTTP, suitable for server-rendered sites.
/// - `BrowserFetcher` (feature `browser`): headless Chromium for
///   client-rendered pages.
///
/// Contract: any navigation error, timeout, or rendering crash yields
/// a `FetchError` carrying the URL; the caller logs and skips. Any
/// per-fetch resources (browser pages) are released on every exit
/// path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch one URL.
    async fn fetch(&self, url: &Url) -> FetchResult<Page>;

    /// Fetcher name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}
