//! Crawl orchestrator: fetch, organize, embed, store.
//!
//! Walks one site breadth-first from a start URL using an explicit
//! worklist, staying on the start URL's origin. Every failure is per
//! page: a bad fetch, a failed embedding, or a store error is logged
//! and the crawl moves on.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{IndexError, Result};
use crate::frontier::CrawlFrontier;
use crate::normalizer::organize_document;
use crate::traits::{Ai, DocumentStore, Fetcher};
use crate::types::{CrawlConfig, Document};

/// Outcome counters for one crawl run.
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Pages fetched successfully.
    pub pages_fetched: usize,

    /// Pages organized, embedded, and stored.
    pub pages_indexed: usize,

    /// Pages fetched but below the minimum content length.
    pub pages_skipped_short: usize,

    /// URLs that failed at any stage, with nothing stored for them.
    pub failed: Vec<String>,
}

impl CrawlReport {
    /// Whether every fetched page made it into the index or was
    /// legitimately skipped.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Crawl a site and index its pages.
///
/// Visits each URL at most once, follows only links sharing the start
/// URL's origin, and sleeps `config.delay_ms` between page requests.
/// Returns an error only when the start URL itself is unusable;
/// everything past that point degrades per page.
pub async fn crawl<F, A, S>(
    start_url: &str,
    config: &CrawlConfig,
    fetcher: &F,
    ai: &A,
    store: &S,
) -> Result<CrawlReport>
where
    F: Fetcher + ?Sized,
    A: Ai + ?Sized,
    S: DocumentStore + ?Sized,
{
    let start = Url::parse(start_url).map_err(|_| IndexError::InvalidStartUrl {
        url: start_url.to_string(),
    })?;
    if !start.has_host() {
        return Err(IndexError::InvalidStartUrl {
            url: start_url.to_string(),
        });
    }
    let origin = start.origin();

    info!(url = %start, fetcher = fetcher.name(), "Crawl starting");

    let mut frontier = CrawlFrontier::new();
    let mut queue: VecDeque<Url> = VecDeque::new();
    let mut report = CrawlReport::default();

    frontier.should_visit(&start);
    queue.push_back(start);

    let mut first_request = true;

    while let Some(url) = queue.pop_front() {
        if let Some(max) = config.max_pages {
            if report.pages_fetched >= max {
                info!(max_pages = max, "Page cap reached, stopping crawl");
                break;
            }
        }

        // Politeness pacing between requests
        if !first_request && config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
        }
        first_request = false;

        let page = match fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to fetch page");
                report.failed.push(url.to_string());
                continue;
            }
        };
        report.pages_fetched += 1;

        // Enqueue same-origin links regardless of whether this page
        // gets indexed; thin hub pages still lead somewhere.
        for link in &page.links {
            if link.origin() == origin && frontier.should_visit(link) {
                queue.push_back(link.clone());
            }
        }

        // Indexing requires strictly more text than the gate length
        if page.text_len() <= config.min_content_len {
            debug!(
                url = %page.url,
                text_len = page.text_len(),
                "Content too short, not indexing"
            );
            report.pages_skipped_short += 1;
            continue;
        }

        let normalized = organize_document(ai, &page.raw_text, page.url.as_str()).await;

        let embedding = match ai.embed(&normalized.content).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(url = %page.url, error = %e, "Failed to embed document, skipping");
                report.failed.push(page.url.to_string());
                continue;
            }
        };

        let document = Document::new(
            normalized.title,
            Some(page.url.to_string()),
            normalized.content,
            embedding,
        );

        match store.insert(&document).await {
            Ok(id) => {
                debug!(url = %page.url, id = id, "Document indexed");
                report.pages_indexed += 1;
            }
            Err(e) => {
                warn!(url = %page.url, error = %e, "Failed to store document");
                report.failed.push(page.url.to_string());
            }
        }
    }

    info!(
        pages_fetched = report.pages_fetched,
        pages_indexed = report.pages_indexed,
        pages_skipped_short = report.pages_skipped_short,
        failed = report.failed.len(),
        "Crawl completed"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryStore;
    use crate::testing::{MockAi, MockFetcher};
    use crate::types::Page;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn fast_config() -> CrawlConfig {
        CrawlConfig::new().with_delay_ms(0)
    }

    fn long_text(label: &str) -> String {
        format!("{} {}", label, "lorem ipsum dolor sit amet ".repeat(5))
    }

    #[tokio::test]
    async fn crawls_linked_pages_once() {
        let fetcher = MockFetcher::new().with_pages([
            Page::new(url("https://a.test/"), long_text("home"))
                .with_link(url("https://a.test/about")),
            // Cycle back to the root
            Page::new(url("https://a.test/about"), long_text("about"))
                .with_link(url("https://a.test/")),
        ]);
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.pages_indexed, 2);
        assert!(report.is_success());
        assert_eq!(fetcher.fetched_urls().len(), 2);
        assert_eq!(store.document_count(), 2);
    }

    #[tokio::test]
    async fn ignores_cross_origin_links() {
        let fetcher = MockFetcher::new().with_page(
            Page::new(url("https://a.test/"), long_text("home"))
                .with_link(url("https://other.test/x")),
        );
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 1);
        assert_eq!(fetcher.fetched_urls(), vec!["https://a.test/"]);
    }

    #[tokio::test]
    async fn short_pages_skip_indexing_but_links_are_followed() {
        let fetcher = MockFetcher::new().with_pages([
            Page::new(url("https://a.test/"), "hi").with_link(url("https://a.test/real")),
            Page::new(url("https://a.test/real"), long_text("real")),
        ]);
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.pages_skipped_short, 1);
        assert_eq!(report.pages_indexed, 1);
        assert_eq!(store.document_count(), 1);
    }

    #[tokio::test]
    async fn content_gate_excludes_exact_boundary_length() {
        // Exactly at the gate is still too short; one past it indexes.
        let at_gate = "x".repeat(10);
        let past_gate = "y".repeat(11);
        let fetcher = MockFetcher::new().with_pages([
            Page::new(url("https://a.test/short"), at_gate),
            Page::new(url("https://a.test/long"), past_gate),
        ]);
        let ai = MockAi::new();
        let store = MemoryStore::new();
        let config = fast_config().with_min_content_len(10);

        let report = crawl("https://a.test/short", &config, &fetcher, &ai, &store)
            .await
            .unwrap();
        assert_eq!(report.pages_skipped_short, 1);
        assert_eq!(report.pages_indexed, 0);

        let report = crawl("https://a.test/long", &config, &fetcher, &ai, &store)
            .await
            .unwrap();
        assert_eq!(report.pages_skipped_short, 0);
        assert_eq!(report.pages_indexed, 1);
    }

    #[tokio::test]
    async fn fetch_failure_does_not_stop_crawl() {
        let fetcher = MockFetcher::new()
            .with_page(
                Page::new(url("https://a.test/"), long_text("home"))
                    .with_link(url("https://a.test/broken"))
                    .with_link(url("https://a.test/ok")),
            )
            .with_page(Page::new(url("https://a.test/ok"), long_text("ok")))
            .fail_url("https://a.test/broken");
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 2);
        assert_eq!(report.pages_indexed, 2);
        assert_eq!(report.failed, vec!["https://a.test/broken"]);
    }

    #[tokio::test]
    async fn embed_failure_stores_nothing_for_the_page() {
        let fetcher =
            MockFetcher::new().with_page(Page::new(url("https://a.test/"), long_text("home")));
        let ai = MockAi::new().with_embed_failure();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_indexed, 0);
        assert_eq!(store.document_count(), 0);
        assert_eq!(report.failed, vec!["https://a.test/"]);
    }

    #[tokio::test]
    async fn organize_failure_indexes_raw_text() {
        let raw = long_text("verbatim");
        let fetcher =
            MockFetcher::new().with_page(Page::new(url("https://a.test/"), raw.clone()));
        let ai = MockAi::new().with_organize_failure();
        let store = MemoryStore::new();

        let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_indexed, 1);
        let doc = store.get(1).unwrap();
        assert_eq!(doc.content, raw);
        assert_eq!(doc.title, "https://a.test/");
    }

    #[tokio::test]
    async fn max_pages_caps_the_run() {
        let fetcher = MockFetcher::new().with_pages([
            Page::new(url("https://a.test/"), long_text("home"))
                .with_link(url("https://a.test/1"))
                .with_link(url("https://a.test/2")),
            Page::new(url("https://a.test/1"), long_text("one")),
            Page::new(url("https://a.test/2"), long_text("two")),
        ]);
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let config = fast_config().with_max_pages(2);
        let report = crawl("https://a.test/", &config, &fetcher, &ai, &store)
            .await
            .unwrap();

        assert_eq!(report.pages_fetched, 2);
    }

    #[tokio::test]
    async fn rejects_invalid_start_url() {
        let fetcher = MockFetcher::new();
        let ai = MockAi::new();
        let store = MemoryStore::new();

        let err = crawl("not a url", &fast_config(), &fetcher, &ai, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, IndexError::InvalidStartUrl { .. }));
    }
}
