//! Visited-URL tracking for one crawl run.

use std::collections::HashSet;

use url::Url;

/// Tracks which URLs have been claimed during a single crawl run.
///
/// Prevents reprocessing and infinite recursion on cyclic link graphs.
/// Grows monotonically and is discarded with the run; never persisted.
/// The driver loop is the single mutator, so no interior locking.
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    seen: HashSet<String>,
}

impl CrawlFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once per normalized URL, marking it seen.
    ///
    /// The caller must only fetch URLs this method approved; that is
    /// what guarantees at-most-one fetch per URL per run.
    pub fn should_visit(&mut self, url: &Url) -> bool {
        self.seen.insert(Self::normalize(url))
    }

    /// Whether a URL has already been claimed.
    pub fn contains(&self, url: &Url) -> bool {
        self.seen.contains(&Self::normalize(url))
    }

    /// Number of URLs claimed so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been claimed yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Normalized form used for equality: scheme+host+port+path+query,
    /// fragment stripped.
    fn normalize(url: &Url) -> String {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn visits_each_url_once() {
        let mut frontier = CrawlFrontier::new();
        assert!(frontier.should_visit(&url("https://a.test/")));
        assert!(!frontier.should_visit(&url("https://a.test/")));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn fragment_does_not_distinguish_urls() {
        let mut frontier = CrawlFrontier::new();
        assert!(frontier.should_visit(&url("https://a.test/page#top")));
        assert!(!frontier.should_visit(&url("https://a.test/page#bottom")));
        assert!(!frontier.should_visit(&url("https://a.test/page")));
    }

    #[test]
    fn query_distinguishes_urls() {
        let mut frontier = CrawlFrontier::new();
        assert!(frontier.should_visit(&url("https://a.test/page?p=1")));
        assert!(frontier.should_visit(&url("https://a.test/page?p=2")));
        assert_eq!(frontier.len(), 2);
    }

    #[test]
    fn survives_cycles() {
        // A -> B -> A must terminate after two visits.
        let mut frontier = CrawlFrontier::new();
        let a = url("https://a.test/a");
        let b = url("https://a.test/b");

        assert!(frontier.should_visit(&a));
        assert!(frontier.should_visit(&b));
        assert!(!frontier.should_visit(&a));
        assert_eq!(frontier.len(), 2);
    }
}
