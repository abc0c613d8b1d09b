//! End-to-end pipeline tests against the in-memory store and mocks.

use siteindex::testing::{MockAi, MockFetcher};
use siteindex::{
    crawl, retrieve, CrawlConfig, Document, DocumentStore, MemoryStore, Page, RetrievalConfig,
};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn body(label: &str) -> String {
    format!(
        "{}: visiting information, programs, and contact details for the site. {}",
        label,
        "More descriptive text follows. ".repeat(3)
    )
}

fn fast_config() -> CrawlConfig {
    CrawlConfig::new().with_delay_ms(0)
}

#[tokio::test]
async fn crawl_then_retrieve_round_trip() {
    let fetcher = MockFetcher::new().with_pages([
        Page::new(url("https://museum.test/"), body("home"))
            .with_link(url("https://museum.test/hours"))
            .with_link(url("https://museum.test/tickets")),
        Page::new(url("https://museum.test/hours"), body("hours")),
        Page::new(url("https://museum.test/tickets"), body("tickets")),
    ]);
    let ai = MockAi::new()
        .with_organized("https://museum.test/hours", "Opening Hours\nOpen 9-17 daily.")
        .with_embedding("Opening Hours\nOpen 9-17 daily.", vec![1.0, 0.0, 0.0])
        .with_embedding("when is the museum open", vec![1.0, 0.0, 0.0]);
    // Dimension must stay constant across documents
    let ai = ai.with_embedding_dim(3);
    let store = MemoryStore::new();

    let report = crawl("https://museum.test/", &fast_config(), &fetcher, &ai, &store)
        .await
        .unwrap();

    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.pages_indexed, 3);
    assert!(report.is_success());

    let matches = retrieve(
        "when is the museum open",
        &RetrievalConfig::new().with_threshold(0.9).with_top_k(5),
        &ai,
        &store,
    )
    .await
    .unwrap();

    assert!(!matches.is_empty());
    assert!(matches[0].content.contains("Open 9-17"));
    assert!(matches[0].similarity >= 0.9);
}

#[tokio::test]
async fn cyclic_links_fetch_each_page_once() {
    let fetcher = MockFetcher::new().with_pages([
        Page::new(url("https://a.test/a"), body("a")).with_link(url("https://a.test/b")),
        Page::new(url("https://a.test/b"), body("b")).with_link(url("https://a.test/a")),
    ]);
    let ai = MockAi::new();
    let store = MemoryStore::new();

    let report = crawl("https://a.test/a", &fast_config(), &fetcher, &ai, &store)
        .await
        .unwrap();

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(fetcher.fetched_urls().len(), 2);
}

#[tokio::test]
async fn cross_origin_links_are_never_fetched() {
    let fetcher = MockFetcher::new().with_pages([
        Page::new(url("https://a.test/"), body("home"))
            .with_link(url("https://other.test/x"))
            .with_link(url("http://a.test/insecure")),
    ]);
    let ai = MockAi::new();
    let store = MemoryStore::new();

    crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
        .await
        .unwrap();

    // Different host and different scheme both stay out of the crawl
    assert_eq!(fetcher.fetched_urls(), vec!["https://a.test/"]);
}

#[tokio::test]
async fn short_page_links_still_expand_the_crawl() {
    let fetcher = MockFetcher::new().with_pages([
        Page::new(url("https://a.test/"), "hi").with_link(url("https://a.test/deep")),
        Page::new(url("https://a.test/deep"), body("deep")),
    ]);
    let ai = MockAi::new();
    let store = MemoryStore::new();

    let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
        .await
        .unwrap();

    assert_eq!(report.pages_skipped_short, 1);
    assert_eq!(report.pages_indexed, 1);
    assert_eq!(store.document_count(), 1);
}

#[tokio::test]
async fn embed_outage_leaves_store_empty_but_crawl_finishes() {
    let fetcher = MockFetcher::new().with_pages([
        Page::new(url("https://a.test/"), body("home")).with_link(url("https://a.test/next")),
        Page::new(url("https://a.test/next"), body("next")),
    ]);
    let ai = MockAi::new().with_embed_failure();
    let store = MemoryStore::new();

    let report = crawl("https://a.test/", &fast_config(), &fetcher, &ai, &store)
        .await
        .unwrap();

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_indexed, 0);
    assert_eq!(store.document_count(), 0);
    assert_eq!(report.failed.len(), 2);
}

#[tokio::test]
async fn organize_outage_indexes_raw_text_verbatim() {
    let raw = body("fallback");
    let fetcher = MockFetcher::new().with_page(Page::new(url("https://a.test/"), raw.clone()));
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
async fn retrieval_filters_and_ranks() {
    let store = MemoryStore::new();
    for (content, embedding) in [
        ("best", vec![1.0, 0.0]),
        ("good", vec![0.95, 0.05]),
        ("fair", vec![0.8, 0.2]),
        ("weak", vec![0.3, 0.7]),
        ("off", vec![0.0, 1.0]),
    ] {
        store
            .insert(&Document::new(content, None, content, embedding))
            .await
            .unwrap();
    }

    let ai = MockAi::new().with_embedding("q", vec![1.0, 0.0]);
    let config = RetrievalConfig::new().with_threshold(0.78).with_top_k(5);

    let matches = retrieve("q", &config, &ai, &store).await.unwrap();

    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].content, "best");
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].similarity >= pair[1].similarity));

    let capped = retrieve(
        "q",
        &RetrievalConfig::new().with_threshold(0.0).with_top_k(2),
        &ai,
        &store,
    )
    .await
    .unwrap();
    assert_eq!(capped.len(), 2);
}
