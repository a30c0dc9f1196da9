// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tuning defaults and the per-session configuration.
//!
//! The constants are the values a session falls back to when the caller does
//! not say otherwise. [`SessionConfig`] is the runtime context that carries the
//! caller's choices into every component constructor, so nothing in the crate
//! reads process-wide mutable state.

/// Worker threads used when concurrency is requested without a thread count.
pub const DEFAULT_THREADS: usize = 5;

/// Maximum number of pages a crawl visits, seed included.
pub const DEFAULT_CRAWL_LIMIT: usize = 50;

/// How much the page limit grows each time a running crawler is re-seeded.
pub const RESEED_LIMIT_INCREMENT: usize = 20;

/// Redirects followed before a fetch is abandoned.
pub const DEFAULT_REDIRECTS: usize = 3;

/// File extensions (lowercase, no dot) treated as indexable text.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Output file used when `--index` is given without a value.
pub const DEFAULT_INDEX_OUTPUT: &str = "index.json";

/// Output file used when `--counts` is given without a value.
pub const DEFAULT_COUNTS_OUTPUT: &str = "counts.json";

/// Output file used when `--results` is given without a value.
pub const DEFAULT_RESULTS_OUTPUT: &str = "results.json";

/// Runtime context for one build/crawl/search session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Worker thread count. `None` runs everything on the calling thread.
    pub threads: Option<usize>,
    /// Page limit for crawls.
    pub limit: usize,
    /// Redirect budget for each page fetch.
    pub redirects: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            threads: None,
            limit: DEFAULT_CRAWL_LIMIT,
            redirects: DEFAULT_REDIRECTS,
        }
    }
}

impl SessionConfig {
    /// Configuration for a concurrent session with `threads` workers.
    pub fn concurrent(threads: usize) -> Self {
        Self {
            threads: Some(threads),
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_redirects(mut self, redirects: usize) -> Self {
        self.redirects = redirects;
        self
    }

    /// Thread count a crawl runs with; crawling is always concurrent.
    pub fn crawl_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }
}
