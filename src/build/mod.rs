// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building an index from a directory of text files.
//!
//! Every file becomes one location, keyed by its walked path. Its stems are
//! added at positions `1..=n` and `n` is recorded as its word count.
//!
//! The serial builder lives here; the work-queue builder is in [`parallel`].

pub mod parallel;

use std::path::Path;

use crate::error::Result;
use crate::index::{Index, InvertedIndex};
use crate::text::{list_text_files, stem_file};

pub use parallel::*;

/// Location string for a file path.
pub fn location_of(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Add `stems` at positions `1..=n` and record `n` as the word count.
pub fn index_stems<I: Index>(index: &mut I, location: &str, stems: &[String]) -> usize {
    index.add_all(stems, location, 1);
    index.set_word_count(location, stems.len());
    stems.len()
}

/// Stem one file and add it to `index`. Returns the file's word count.
pub fn add_file<I: Index>(index: &mut I, path: &Path) -> Result<usize> {
    let stems = stem_file(path)?;
    Ok(index_stems(index, &location_of(path), &stems))
}

/// Stem one file into a fresh private index.
pub fn parse_file(path: &Path) -> Result<InvertedIndex> {
    let mut local = InvertedIndex::new();
    add_file(&mut local, path)?;
    Ok(local)
}

/// Build an index on the calling thread.
pub fn build_index(root: &Path) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::new();
    add_files(&mut index, root)?;
    Ok(index)
}

/// Add every text file under `root` to an existing index.
///
/// Files that fail to read are logged and skipped. Returns the number of files
/// that made it in.
pub fn add_files<I: Index>(index: &mut I, root: &Path) -> Result<usize> {
    let files = list_text_files(root)?;
    let mut indexed = 0;
    for path in &files {
        match add_file(index, path) {
            Ok(words) => {
                tracing::debug!(path = %path.display(), words, "indexed file");
                indexed += 1;
            }
            Err(e) => tracing::warn!(error = %e, "skipping file"),
        }
    }
    tracing::info!(root = %root.display(), files = indexed, stems = index.num_stems(), "index built");
    Ok(indexed)
}
