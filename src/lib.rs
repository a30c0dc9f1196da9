// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent stemmed inverted index over file trees and bounded web crawls.
//!
//! Text goes in as files or web pages, comes out as stems at positions, and
//! multi-word queries are ranked by how much of each location they cover.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   text/      │────▶│   build/     │────▶│   index/     │
//! │ (clean, stem,│     │ (serial and  │     │ (Inverted,   │
//! │  find files) │     │  per-file    │     │  Concurrent) │
//! └──────────────┘     │  tasks)      │     └──────────────┘
//!        ▲             └──────────────┘            │
//!        │                    ▲                    ▼
//! ┌──────────────┐            │            ┌──────────────┐
//! │    web/      │────────────┘            │   search/    │
//! │ (fetch, html,│                         │ (canonical   │
//! │  crawler)    │                         │  queries,    │
//! └──────────────┘                         │  ranking)    │
//!        │                                 └──────────────┘
//!        ▼                                        │
//! ┌─────────────────────────────────────────────────────┐
//! │                    concurrency/                      │
//! │   WorkQueue (pending barrier) · ReadWriteLock        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! A [`Session`] ties it together: it owns the index and, when concurrent,
//! the one work queue every phase shares.
//!
//! # Usage
//!
//! ```no_run
//! let mut session = stemdex::build("docs/", Some(4))?;
//! for (query, results) in stemdex::search(&mut session, &["running dogs"], false) {
//!     for hit in results {
//!         println!("{query}: {} {:.4}", hit.location, hit.score);
//!     }
//! }
//! # Ok::<(), stemdex::Error>(())
//! ```

pub mod build;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod search;
pub mod session;
pub mod text;
pub mod web;

pub use concurrency::{ReadWriteLock, Spawner, WorkQueue};
pub use config::SessionConfig;
pub use error::{Error, Result};
pub use index::{ConcurrentIndex, Index, IndexSnapshot, InvertedIndex};
pub use search::{canonical_query, CanonicalQuery, SearchResult};
pub use session::Session;
pub use web::{Fetcher, HttpFetcher, WebCrawler};

/// Build a session from a path or an http(s) seed URL.
///
/// Paths are indexed on the calling thread when `threads` is `None` and on a
/// work queue otherwise. URLs are always crawled concurrently, with the
/// default pool size and page limit unless `threads` says otherwise.
pub fn build(source: &str, threads: Option<usize>) -> Result<Session> {
    let config = SessionConfig {
        threads,
        ..SessionConfig::default()
    };
    Session::build(source, config)
}

/// Evaluate query lines against a session. See [`Session::search`].
pub fn search<S: AsRef<str>>(
    session: &mut Session,
    lines: &[S],
    exact: bool,
) -> Vec<(String, Vec<SearchResult>)> {
    session.search(lines, exact)
}
