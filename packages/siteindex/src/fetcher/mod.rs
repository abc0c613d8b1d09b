//! Fetcher implementations.
//!
//! `HttpFetcher` is the default and needs no extra runtime. For sites
//! that render their content client-side, enable the `browser` feature
//! and use `BrowserFetcher`.

pub mod http;

#[cfg(feature = "browser")]
pub mod browser;

pub use http::HttpFetcher;

#[cfg(feature = "browser")]
pub use browser::BrowserFetcher;
