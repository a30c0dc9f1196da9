// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Canonical queries and their evaluation, serial and on the work queue.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::concurrency::WorkQueue;
use crate::error::{Error, Result};
use crate::index::{ConcurrentIndex, Index};
use crate::text::unique_stems;

/// A query line reduced to sorted, distinct stems.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalQuery {
    stems: Vec<String>,
    key: String,
}

impl CanonicalQuery {
    /// The cache key: stems joined by single spaces.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn stems(&self) -> &[String] {
        &self.stems
    }
}

/// Canonicalize a query line. `None` when the line has no stems.
pub fn canonical_query(line: &str) -> Option<CanonicalQuery> {
    let stems: Vec<String> = unique_stems(line).into_iter().collect();
    if stems.is_empty() {
        return None;
    }
    let key = stems.join(" ");
    Some(CanonicalQuery { stems, key })
}

/// Search one line and cache the ranked results under its canonical key.
///
/// A key that is already cached is not searched again. Returns the key, or
/// `None` for a line without stems.
pub fn evaluate_line<I: Index>(index: &mut I, line: &str, exact: bool) -> Option<String> {
    let query = canonical_query(line)?;
    if !index.is_cached(query.key()) {
        let results = index.search(query.stems(), exact);
        tracing::debug!(query = query.key(), results = results.len(), "evaluated query");
        index.cache_results(query.key(), results);
    }
    Some(query.key)
}

/// Evaluate every line on the calling thread. Returns the keys in line order.
pub fn evaluate_queries<I, S>(index: &mut I, lines: &[S], exact: bool) -> Vec<String>
where
    I: Index,
    S: AsRef<str>,
{
    lines
        .iter()
        .filter_map(|line| evaluate_line(index, line.as_ref(), exact))
        .collect()
}

/// Evaluate every non-blank line as its own task, then wait for all of them.
///
/// Returns the number of tasks submitted.
pub fn evaluate_queries_parallel<S: AsRef<str>>(
    queue: &WorkQueue,
    index: &Arc<ConcurrentIndex>,
    lines: &[S],
    exact: bool,
) -> Result<usize> {
    let mut submitted = 0;
    for line in lines {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }
        let line = line.to_string();
        let index = Arc::clone(index);
        queue.submit(move || {
            let mut shared: &ConcurrentIndex = &index;
            evaluate_line(&mut shared, &line, exact);
            Ok(())
        })?;
        submitted += 1;
    }
    queue.finish();
    tracing::info!(queries = submitted, exact, "queries evaluated");
    Ok(submitted)
}

/// Read a query file, one query per line.
pub fn read_query_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(text.lines().map(str::to_string).collect())
}
