// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page fetching.

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, StatusCode, Url};

use crate::config::DEFAULT_REDIRECTS;
use crate::error::Result;

/// Source of HTML pages for the crawler.
///
/// `None` covers every reason a page is unusable: network failure, a status
/// other than 200, a non-HTML body, too many redirects. The crawler treats
/// them all the same way and moves on.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &Url) -> Option<String>;
}

/// Blocking HTTP(S) fetcher with a redirect budget.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(redirects: usize) -> Result<Self> {
        let client = Client::builder()
            .redirect(redirect::Policy::limited(redirects))
            .user_agent(concat!("stemdex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_default_redirects() -> Result<Self> {
        Self::new(DEFAULT_REDIRECTS)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.clone()).send() {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(%url, error = %e, "fetch failed");
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::debug!(%url, status = %response.status(), "skipping non-200 response");
            return None;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !is_html(content_type) {
            tracing::debug!(%url, content_type, "skipping non-html response");
            return None;
        }

        response.text().ok()
    }
}

/// `Content-Type` values that start with `text/html`, any case.
pub(crate) fn is_html(content_type: &str) -> bool {
    content_type
        .trim_start()
        .get(..9)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/html"))
}
