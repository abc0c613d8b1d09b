//! Transient page type produced by fetchers.

use chrono::{DateTime, Utc};
use url::Url;

/// A fetched page: rendered text plus the same-origin links found on it.
///
/// Produced by a `Fetcher`, consumed once by the orchestrator, not
/// retained.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL the page was fetched from (after redirects).
    pub url: Url,

    /// Visible text with consecutive whitespace collapsed and ends trimmed.
    pub raw_text: String,

    /// Absolute outbound links sharing this page's origin, in document order.
    pub links: Vec<Url>,

    /// When the page was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl Page {
    /// Create a new page with no links.
    pub fn new(url: Url, raw_text: impl Into<String>) -> Self {
        Self {
            url,
            raw_text: raw_text.into(),
            links: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Add an outbound link.
    pub fn with_link(mut self, link: Url) -> Self {
        self.links.push(link);
        self
    }

    /// Add multiple outbound links.
    pub fn with_links(mut self, links: impl IntoIterator<Item = Url>) -> Self {
        self.links.extend(links);
        self
    }

    /// Text length in characters.
    pub fn text_len(&self) -> usize {
        self.raw_text.chars().count()
    }
}
