// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Concurrent crawler bounded by a page limit.
//!
//! # Algorithm
//!
//! Each admitted URL becomes one task on the work queue. A task:
//! 1. fetches the page (a failed fetch ends the task quietly)
//! 2. strips comments and block elements, then lists the anchors
//! 3. admits new links under the frontier lock, submitting a task for each
//! 4. strips the remaining markup, stems the text into a private index and
//!    merges it into the shared one
//!
//! # Frontier
//!
//! The visited set, the discovery order and the limit share one mutex. Step 3
//! checks the limit, checks for a duplicate, inserts and submits in one
//! critical section, so the visited set never exceeds the limit and no URL is
//! queued twice. Lock order is frontier, then work queue; nothing takes them
//! the other way round.
//!
//! Because a child task is submitted (and counted as pending) before its
//! parent returns, [`WorkQueue::finish`] only returns once the whole reachable
//! frontier is done.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Url;

use crate::build::index_stems;
use crate::concurrency::{Spawner, WorkQueue};
use crate::config::RESEED_LIMIT_INCREMENT;
use crate::error::Result;
use crate::index::{ConcurrentIndex, Index, InvertedIndex};
use crate::text::list_stems;

use super::html::{list_links, strip_block_elements, strip_entities, strip_tags};
use super::{parse_url, Fetcher};

#[derive(Debug)]
struct Frontier {
    visited: HashSet<Url>,
    order: Vec<Url>,
    limit: usize,
}

impl Frontier {
    fn admit(&mut self, url: &Url) -> bool {
        if self.visited.len() >= self.limit || self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.order.push(url.clone());
        true
    }

    /// Undo an admission whose page never reached the queue.
    fn forget(&mut self, url: &Url) {
        if self.visited.remove(url) {
            self.order.retain(|seen| seen != url);
        }
    }
}

struct CrawlContext {
    spawner: Spawner,
    index: Arc<ConcurrentIndex>,
    fetcher: Arc<dyn Fetcher>,
    frontier: Mutex<Frontier>,
}

impl CrawlContext {
    fn spawn(self: &Arc<Self>, url: Url) -> Result<()> {
        let ctx = Arc::clone(self);
        self.spawner.submit(move || ctx.visit(&url))
    }

    fn visit(self: &Arc<Self>, url: &Url) -> Result<()> {
        let Some(html) = self.fetcher.fetch(url) else {
            tracing::debug!(%url, "nothing to index");
            return Ok(());
        };

        let html = strip_block_elements(&html);
        self.admit_links(list_links(url, &html))?;

        let text = strip_entities(&strip_tags(&html));
        let stems = list_stems(&text);
        let location = url.as_str();

        let mut local = InvertedIndex::new();
        index_stems(&mut local, location, &stems);
        self.index.merge(&local, location);
        if let Some(count) = local.word_count(location) {
            self.index.set_word_count(location, count);
        }

        tracing::debug!(%url, words = stems.len(), "indexed page");
        Ok(())
    }

    fn admit_links(self: &Arc<Self>, links: Vec<Url>) -> Result<()> {
        let mut frontier = self.frontier.lock();
        for link in links {
            if frontier.admit(&link) {
                if let Err(e) = self.spawn(link.clone()) {
                    frontier.forget(&link);
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

/// Crawls from seed URLs into a shared index.
pub struct WebCrawler {
    queue: Arc<WorkQueue>,
    ctx: Arc<CrawlContext>,
}

impl WebCrawler {
    pub fn new(
        queue: Arc<WorkQueue>,
        index: Arc<ConcurrentIndex>,
        fetcher: Arc<dyn Fetcher>,
        limit: usize,
    ) -> Self {
        let ctx = CrawlContext {
            spawner: queue.spawner(),
            index,
            fetcher,
            frontier: Mutex::new(Frontier {
                visited: HashSet::new(),
                order: Vec::new(),
                limit,
            }),
        };
        Self {
            queue,
            ctx: Arc::new(ctx),
        }
    }

    /// Crawl from `seed` until the frontier is exhausted or the limit is hit.
    ///
    /// Blocks until every page reachable within the limit has been indexed.
    /// A seed that was already visited is not crawled again.
    pub fn crawl(&self, seed: &str) -> Result<()> {
        let url = parse_url(seed)?;

        let admitted = {
            let mut frontier = self.ctx.frontier.lock();
            let admitted = frontier.admit(&url);
            if admitted {
                if let Err(e) = self.ctx.spawn(url.clone()) {
                    frontier.forget(&url);
                    return Err(e);
                }
            }
            admitted
        };
        if !admitted {
            tracing::info!(%url, limit = self.limit(), "seed already visited or limit reached");
            return Ok(());
        }

        self.queue.finish();
        tracing::info!(
            seed = %url,
            visited = self.visited_count(),
            stems = self.ctx.index.num_stems(),
            "crawl finished"
        );
        Ok(())
    }

    /// Raise the page limit and crawl again from a new seed into the same index.
    pub fn crawl_more(&self, seed: &str) -> Result<()> {
        self.ctx.frontier.lock().limit += RESEED_LIMIT_INCREMENT;
        self.crawl(seed)
    }

    /// Visited URLs in the order they were admitted.
    pub fn visited(&self) -> Vec<Url> {
        self.ctx.frontier.lock().order.clone()
    }

    pub fn visited_count(&self) -> usize {
        self.ctx.frontier.lock().visited.len()
    }

    pub fn limit(&self) -> usize {
        self.ctx.frontier.lock().limit
    }

    pub fn index(&self) -> &Arc<ConcurrentIndex> {
        &self.ctx.index
    }
}

impl fmt::Debug for WebCrawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frontier = self.ctx.frontier.lock();
        f.debug_struct("WebCrawler")
            .field("visited", &frontier.visited.len())
            .field("limit", &frontier.limit)
            .finish_non_exhaustive()
    }
}
