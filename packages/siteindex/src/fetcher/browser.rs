//! Headless-browser fetcher implementation.
//!
//! Drives a shared Chromium instance via `chromiumoxide` so that
//! client-rendered pages produce their full text. One tab is opened
//! per fetch and released on every exit path.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::Fetcher;
use crate::types::Page;

const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// RAII guard for a browser tab.
///
/// chromiumoxide pages need an explicit async `close()`; without it,
/// tabs accumulate in the browser across fetches. The guard prefers
/// an explicit `close()` call and falls back to a spawned close in
/// `Drop` for error paths.
struct PageGuard {
    page: Option<chromiumoxide::Page>,
    url: String,
    runtime_handle: tokio::runtime::Handle,
}

impl PageGuard {
    fn new(page: chromiumoxide::Page, url: String) -> Self {
        Self {
            page: Some(page),
            url,
            runtime_handle: tokio::runtime::Handle::current(),
        }
    }

    fn page(&self) -> &chromiumoxide::Page {
        self.page.as_ref().expect("PageGuard: page already consumed")
    }

    /// Close the tab, consuming the guard.
    async fn close(mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                warn!(url = %self.url, error = %e, "Failed to close browser tab");
            }
        }
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if let Some(page) = self.page.take() {
            let url = std::mem::take(&mut self.url);
            self.runtime_handle.spawn(async move {
                if let Err(e) = page.close().await {
                    warn!(url = %url, error = %e, "Browser tab cleanup failed");
                }
            });
        }
    }
}

/// Fetcher that renders pages in headless Chromium.
///
/// The browser process and its CDP event loop live for the lifetime
/// of the fetcher; call [`BrowserFetcher::close`] when done with it.
pub struct BrowserFetcher {
    browser: Browser,
    handler_task: tokio::task::JoinHandle<()>,
    navigation_timeout: Duration,
}

impl BrowserFetcher {
    /// Launch a headless browser.
    pub async fn launch() -> FetchResult<Self> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(|e| FetchError::Render {
                url: String::new(),
                message: format!("browser config: {}", e),
            })?;

        let (browser, mut handler) =
            Browser::launch(config).await.map_err(|e| FetchError::Render {
                url: String::new(),
                message: format!("browser launch: {}", e),
            })?;

        // The handler stream must be drained for CDP to make progress
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser handler event error");
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        })
    }

    /// Set the per-page navigation timeout.
    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Shut down the browser process.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "Failed to close browser");
        }
        self.handler_task.abort();
    }
}

#[async_trait]
impl Fetcher for BrowserFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<Page> {
        debug!(url = %url, "Browser fetch starting");

        let tab = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: format!("new page: {}", e),
            })?;
        let guard = PageGuard::new(tab, url.to_string());

        let navigation = async {
            guard
                .page()
                .goto(url.to_string())
                .await
                .map_err(|e| FetchError::Render {
                    url: url.to_string(),
                    message: format!("navigation: {}", e),
                })?;
            guard
                .page()
                .wait_for_navigation()
                .await
                .map_err(|e| FetchError::Render {
                    url: url.to_string(),
                    message: format!("page load: {}", e),
                })?;
            Ok::<(), FetchError>(())
        };

        match tokio::time::timeout(self.navigation_timeout, navigation).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                })
            }
        }

        // Rendered visible text, whitespace collapsed
        let raw_text: String = guard
            .page()
            .evaluate("document.body ? document.body.innerText.replace(/\\s+/g, ' ').trim() : ''")
            .await
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: format!("text extraction: {}", e),
            })?
            .into_value()
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: format!("text decode: {}", e),
            })?;

        // Absolute hrefs of all anchors on the rendered page
        let hrefs: Vec<String> = guard
            .page()
            .evaluate("Array.from(document.querySelectorAll('a[href]')).map(a => a.href)")
            .await
            .map_err(|e| FetchError::Render {
                url: url.to_string(),
                message: format!("link extraction: {}", e),
            })?
            .into_value()
            .unwrap_or_default();

        // URL after client-side redirects
        let final_url = guard
            .page()
            .url()
            .await
            .ok()
            .flatten()
            .and_then(|u| Url::parse(&u).ok())
            .unwrap_or_else(|| url.clone());

        let links: Vec<Url> = hrefs
            .iter()
            .filter_map(|href| Url::parse(href).ok())
            .filter(|link| link.origin() == final_url.origin())
            .collect();

        guard.close().await;

        debug!(
            url = %final_url,
            text_len = raw_text.len(),
            links = links.len(),
            "Page rendered"
        );

        Ok(Page::new(final_url, raw_text).with_links(links))
    }

    fn name(&self) -> &str {
        "browser"
    }
}
