// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One build-then-query session.
//!
//! A session owns the index and, when it runs concurrently, the work queue
//! every phase shares. Whether it is serial or concurrent is decided once, from
//! the [`SessionConfig`], and the rest of the session follows that choice.
//!
//! ```text
//! build(source) ──▶ Session ──▶ search(lines) ──▶ snapshot() ──▶ output
//!                    │
//!                    ├── Serial:     InvertedIndex
//!                    └── Concurrent: WorkQueue + ConcurrentIndex (+ WebCrawler)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

#[cfg(feature = "progress")]
use indicatif::ProgressBar;

use crate::build::{add_files, add_files_parallel};
use crate::concurrency::WorkQueue;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::index::{ConcurrentIndex, Index, IndexSnapshot, InvertedIndex};
use crate::search::{
    canonical_query, evaluate_queries, evaluate_queries_parallel, read_query_file, SearchResult,
};
use crate::web::{is_web_source, Fetcher, HttpFetcher, Url, WebCrawler};

struct ConcurrentEngine {
    queue: Arc<WorkQueue>,
    index: Arc<ConcurrentIndex>,
    crawler: Option<WebCrawler>,
}

impl ConcurrentEngine {
    fn new(threads: usize, index: ConcurrentIndex) -> Result<Self> {
        Ok(Self {
            queue: Arc::new(WorkQueue::new(threads)?),
            index: Arc::new(index),
            crawler: None,
        })
    }
}

enum Engine {
    Serial(InvertedIndex),
    Concurrent(ConcurrentEngine),
}

/// Index plus the machinery that fills and queries it.
pub struct Session {
    config: SessionConfig,
    engine: Engine,
}

impl Session {
    /// An empty session. Concurrent when the config names a thread count.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let engine = match config.threads {
            Some(threads) => {
                Engine::Concurrent(ConcurrentEngine::new(threads, ConcurrentIndex::new())?)
            }
            None => Engine::Serial(InvertedIndex::new()),
        };
        Ok(Self { config, engine })
    }

    /// Build from a directory, a text file, or an http(s) seed URL.
    ///
    /// Web sources are always crawled concurrently.
    pub fn build(source: &str, config: SessionConfig) -> Result<Self> {
        if is_web_source(source) {
            let threads = config.crawl_threads();
            let mut session = Self::new(SessionConfig {
                threads: Some(threads),
                ..config
            })?;
            session.crawl(source)?;
            Ok(session)
        } else {
            let mut session = Self::new(config)?;
            session.add_path(Path::new(source))?;
            Ok(session)
        }
    }

    /// Index every text file under `path`. Returns the number of files indexed.
    pub fn add_path(&mut self, path: &Path) -> Result<usize> {
        match &mut self.engine {
            Engine::Serial(index) => add_files(index, path),
            Engine::Concurrent(engine) => add_files_parallel(&engine.queue, &engine.index, path),
        }
    }

    /// [`add_path`](Self::add_path), reporting files as they are merged.
    #[cfg(feature = "progress")]
    pub fn add_path_with_progress(&mut self, path: &Path, progress: &ProgressBar) -> Result<usize> {
        match &mut self.engine {
            Engine::Serial(index) => {
                let indexed = add_files(index, path)?;
                progress.finish_with_message(format!("{} stems", index.num_stems()));
                Ok(indexed)
            }
            Engine::Concurrent(engine) => crate::build::add_files_parallel_with_progress(
                &engine.queue,
                &engine.index,
                path,
                progress,
            ),
        }
    }

    /// Crawl from `seed` over HTTP. A second call re-seeds the same crawler.
    pub fn crawl(&mut self, seed: &str) -> Result<()> {
        if let Engine::Concurrent(ConcurrentEngine {
            crawler: Some(crawler),
            ..
        }) = &self.engine
        {
            return crawler.crawl_more(seed);
        }
        let fetcher = Arc::new(HttpFetcher::new(self.config.redirects)?);
        self.crawl_with(seed, fetcher)
    }

    /// Crawl from `seed` using `fetcher` for pages.
    ///
    /// A serial session switches to concurrent first. When a crawler already
    /// exists it is re-seeded and keeps the fetcher it was created with.
    pub fn crawl_with(&mut self, seed: &str, fetcher: Arc<dyn Fetcher>) -> Result<()> {
        let limit = self.config.limit;
        let engine = self.concurrent()?;
        if let Some(crawler) = &engine.crawler {
            return crawler.crawl_more(seed);
        }
        let crawler = WebCrawler::new(
            Arc::clone(&engine.queue),
            Arc::clone(&engine.index),
            fetcher,
            limit,
        );
        engine.crawler.insert(crawler).crawl(seed)
    }

    /// Evaluate query lines and return each distinct canonical query with its
    /// ranked results, ordered by canonical query.
    pub fn search<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        exact: bool,
    ) -> Vec<(String, Vec<SearchResult>)> {
        match &mut self.engine {
            Engine::Serial(index) => {
                evaluate_queries(index, lines, exact);
            }
            Engine::Concurrent(engine) => {
                if let Err(e) = evaluate_queries_parallel(&engine.queue, &engine.index, lines, exact)
                {
                    tracing::warn!(error = %e, "work queue unavailable, searching on this thread");
                    let mut shared: &ConcurrentIndex = &engine.index;
                    evaluate_queries(&mut shared, lines, exact);
                }
            }
        }

        let keys: BTreeSet<String> = lines
            .iter()
            .filter_map(|line| canonical_query(line.as_ref()))
            .map(|query| query.key().to_string())
            .collect();
        keys.into_iter()
            .filter_map(|key| {
                let results = self.cached_results(&key)?;
                Some((key, results))
            })
            .collect()
    }

    /// Read a query file and [`search`](Self::search) its lines.
    pub fn search_file(
        &mut self,
        path: &Path,
        exact: bool,
    ) -> Result<Vec<(String, Vec<SearchResult>)>> {
        let lines = read_query_file(path)?;
        Ok(self.search(&lines, exact))
    }

    pub fn cached_results(&self, query: &str) -> Option<Vec<SearchResult>> {
        match &self.engine {
            Engine::Serial(index) => index.cached_results(query),
            Engine::Concurrent(engine) => engine.index.cached_results(query),
        }
    }

    /// Owned copy of postings, counts and cached results.
    pub fn snapshot(&self) -> IndexSnapshot {
        match &self.engine {
            Engine::Serial(index) => index.snapshot(),
            Engine::Concurrent(engine) => engine.index.snapshot(),
        }
    }

    pub fn num_stems(&self) -> usize {
        match &self.engine {
            Engine::Serial(index) => index.num_stems(),
            Engine::Concurrent(engine) => engine.index.num_stems(),
        }
    }

    /// Pages admitted by the crawler so far, in discovery order.
    pub fn visited(&self) -> Vec<Url> {
        match &self.engine {
            Engine::Concurrent(ConcurrentEngine {
                crawler: Some(crawler),
                ..
            }) => crawler.visited(),
            _ => Vec::new(),
        }
    }

    pub fn is_concurrent(&self) -> bool {
        matches!(self.engine, Engine::Concurrent(_))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Switch a serial session to concurrent, keeping what it already indexed.
    ///
    /// The work queue is started before the index moves, so a failed start
    /// leaves the session serial and intact.
    fn concurrent(&mut self) -> Result<&mut ConcurrentEngine> {
        if let Engine::Serial(index) = &mut self.engine {
            let threads = self.config.crawl_threads();
            let queue = Arc::new(WorkQueue::new(threads)?);
            let index = Arc::new(ConcurrentIndex::from(std::mem::take(index)));
            self.engine = Engine::Concurrent(ConcurrentEngine {
                queue,
                index,
                crawler: None,
            });
            self.config.threads = Some(threads);
        }
        match &mut self.engine {
            Engine::Concurrent(engine) => Ok(engine),
            Engine::Serial(_) => unreachable!("serial engine replaced above"),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("concurrent", &self.is_concurrent())
            .field("stems", &self.num_stems())
            .finish()
    }
}
