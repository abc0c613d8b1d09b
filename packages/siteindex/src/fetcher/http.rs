//! HTTP-based fetcher implementation.
//!
//! Fetches pages over plain HTTP and extracts visible text and links
//! with regex-based HTML stripping. Suitable for server-rendered
//! sites; JavaScript-heavy sites need `BrowserFetcher`.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::Fetcher;
use crate::types::Page;

/// Fetcher that loads pages with `reqwest` and strips HTML itself.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a new HTTP fetcher with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: "SiteIndexBot/1.0".to_string(),
        }
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Strip markup down to the visible text.
    ///
    /// Script, style, and noscript bodies are removed entirely, all
    /// remaining tags dropped, common entities decoded, and runs of
    /// whitespace collapsed to single spaces.
    fn html_to_text(&self, html: &str) -> String {
        let mut text = html.to_string();

        let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
        let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
        let noscript_pattern = regex::Regex::new(r"(?s)<noscript[^>]*>.*?</noscript>").unwrap();
        text = script_pattern.replace_all(&text, " ").to_string();
        text = style_pattern.replace_all(&text, " ").to_string();
        text = noscript_pattern.replace_all(&text, " ").to_string();

        // Block-level closers become separators so words don't fuse
        let block_pattern =
            regex::Regex::new(r"(?i)</(p|div|li|h[1-6]|tr|section|article|br)>|<br\s*/?>")
                .unwrap();
        text = block_pattern.replace_all(&text, " ").to_string();

        let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
        text = tag_pattern.replace_all(&text, " ").to_string();

        text = text
            .replace("&nbsp;", " ")
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'");

        let whitespace_pattern = regex::Regex::new(r"\s+").unwrap();
        whitespace_pattern.replace_all(&text, " ").trim().to_string()
    }

    /// Extract absolute same-origin links from HTML content.
    fn extract_links(&self, base_url: &Url, html: &str) -> Vec<Url> {
        let mut links = Vec::new();

        let href_pattern = regex::Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).unwrap();

        for cap in href_pattern.captures_iter(html) {
            if let Some(href) = cap.get(1) {
                let href = href.as_str();

                // Skip anchors, javascript, mailto, tel
                if href.starts_with('#')
                    || href.starts_with("javascript:")
                    || href.starts_with("mailto:")
                    || href.starts_with("tel:")
                {
                    continue;
                }

                if let Ok(resolved) = base_url.join(href) {
                    if resolved.origin() == base_url.origin() {
                        links.push(resolved);
                    }
                }
            }
        }

        links
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult<Page> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Http {
                        url: url.to_string(),
                        source: Box::new(e),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("HTTP {}", status),
                )),
            });
        }

        // Final URL after redirects; links resolve against this one
        let final_url = response.url().clone();

        let html = response.text().await.map_err(|e| FetchError::Http {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let raw_text = self.html_to_text(&html);
        let links = self.extract_links(&final_url, &html);

        debug!(
            url = %final_url,
            text_len = raw_text.len(),
            links = links.len(),
            "Page fetched"
        );

        Ok(Page::new(final_url, raw_text).with_links(links))
    }

    fn name(&self) -> &str {
        "http"
    }
}
