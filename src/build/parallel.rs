// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction on the work queue.
//!
//! One task per file. Each task stems its file into a private
//! [`InvertedIndex`], takes the shared postings write lock once to merge it,
//! then records the word count. Contention is one short critical section per
//! file instead of one per word.
//!
//! The driver submits every task and then blocks in [`WorkQueue::finish`].
//! When that returns, every file has either been merged or logged as skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "progress")]
use indicatif::ProgressBar;

use crate::concurrency::WorkQueue;
use crate::error::Result;
use crate::index::{ConcurrentIndex, Index};
use crate::text::list_text_files;

use super::{location_of, parse_file};

/// Build a shared index from every text file under `root`.
pub fn build_index_parallel(queue: &WorkQueue, root: &Path) -> Result<Arc<ConcurrentIndex>> {
    let index = Arc::new(ConcurrentIndex::new());
    add_files_parallel(queue, &index, root)?;
    Ok(index)
}

/// Add every text file under `root` to an existing shared index and wait.
pub fn add_files_parallel(
    queue: &WorkQueue,
    index: &Arc<ConcurrentIndex>,
    root: &Path,
) -> Result<usize> {
    let files = list_text_files(root)?;
    let submitted = submit_files(queue, index, files, || {})?;
    queue.finish();
    tracing::info!(
        root = %root.display(),
        files = submitted,
        stems = index.num_stems(),
        "parallel index built"
    );
    Ok(submitted)
}

/// [`add_files_parallel`] with a progress bar that ticks once per processed file.
#[cfg(feature = "progress")]
pub fn add_files_parallel_with_progress(
    queue: &WorkQueue,
    index: &Arc<ConcurrentIndex>,
    root: &Path,
    progress: &ProgressBar,
) -> Result<usize> {
    let files = list_text_files(root)?;
    progress.set_length(files.len() as u64);

    let bar = progress.clone();
    let submitted = submit_files(queue, index, files, move || bar.inc(1))?;
    queue.finish();

    progress.finish_with_message(format!("{} stems", index.num_stems()));
    Ok(submitted)
}

/// Fallback when progress feature is disabled.
#[cfg(not(feature = "progress"))]
pub fn add_files_parallel_with_progress(
    queue: &WorkQueue,
    index: &Arc<ConcurrentIndex>,
    root: &Path,
) -> Result<usize> {
    add_files_parallel(queue, index, root)
}

fn submit_files<F>(
    queue: &WorkQueue,
    index: &Arc<ConcurrentIndex>,
    files: Vec<PathBuf>,
    on_done: F,
) -> Result<usize>
where
    F: Fn() + Clone + Send + 'static,
{
    let total = files.len();
    for path in files {
        let index = Arc::clone(index);
        let on_done = on_done.clone();
        queue.submit(move || {
            let result = index_file(&index, &path);
            on_done();
            result
        })?;
    }
    Ok(total)
}

fn index_file(index: &ConcurrentIndex, path: &Path) -> Result<()> {
    let local = parse_file(path)?;
    let location = location_of(path);
    index.merge(&local, &location);
    if let Some(count) = local.word_count(&location) {
        index.set_word_count(&location, count);
    }
    tracing::debug!(path = %path.display(), "merged file");
    Ok(())
}
