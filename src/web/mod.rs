// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded web crawling.
//!
//! - **html**: regex-based cleaning and anchor extraction
//! - **fetch**: the [`Fetcher`] seam and its `reqwest` implementation
//! - **crawler**: frontier expansion on the work queue

mod crawler;
mod fetch;
pub mod html;

pub use crawler::WebCrawler;
pub use fetch::{Fetcher, HttpFetcher};
pub use reqwest::Url;

use crate::error::{Error, Result};

/// Parse an absolute http(s) URL and drop its fragment.
pub fn parse_url(text: &str) -> Result<Url> {
    let mut url = Url::parse(text.trim()).map_err(|e| Error::InvalidUrl {
        url: text.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl {
            url: text.to_string(),
            reason: format!("unsupported scheme `{}`", url.scheme()),
        });
    }
    url.set_fragment(None);
    Ok(url)
}

/// True when `source` names a web page rather than a path.
pub fn is_web_source(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
