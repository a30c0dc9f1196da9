// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Thread-safe index built from three independently locked parts.
//!
//! Postings, word counts and the query cache each sit behind their own
//! [`ReadWriteLock`]. Lookups take a read guard, mutation takes a write guard,
//! and no operation holds two guards at once. A search aggregates matches under
//! the postings read lock, drops it, then ranks under the counts read lock, so
//! a search racing a build may see positions whose word count is not in yet.
//! Once the work queue reports `finish()`, the index is quiescent and every
//! search sees a consistent picture.

use super::{Index, IndexSnapshot, InvertedIndex, Postings, QueryCache, WordCounts};
use crate::concurrency::ReadWriteLock;
use crate::search::{rank, SearchResult};

#[derive(Debug, Default)]
pub struct ConcurrentIndex {
    postings: ReadWriteLock<Postings>,
    counts: ReadWriteLock<WordCounts>,
    queries: ReadWriteLock<QueryCache>,
}

impl ConcurrentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, stem: &str, location: &str, position: usize) -> bool {
        self.postings.write().add(stem, location, position)
    }

    /// Add a run of stems under a single write lock.
    pub fn add_all(&self, stems: &[String], location: &str, start: usize) -> bool {
        self.postings.write().add_all(stems, location, start)
    }

    /// Fold a privately built index into this one, one write lock per location.
    pub fn merge(&self, other: &InvertedIndex, location: &str) -> bool {
        self.postings
            .write()
            .merge_location(&other.postings, location)
    }

    pub fn set_word_count(&self, location: &str, count: usize) -> bool {
        self.counts.write().set(location, count)
    }

    pub fn exact_search(&self, stems: &[String]) -> Vec<SearchResult> {
        let matches = self.postings.read().exact_matches(stems);
        let counts = self.counts.read();
        rank(matches, |location| counts.get(location))
    }

    pub fn partial_search(&self, stems: &[String]) -> Vec<SearchResult> {
        let matches = self.postings.read().partial_matches(stems);
        let counts = self.counts.read();
        rank(matches, |location| counts.get(location))
    }

    pub fn search(&self, stems: &[String], exact: bool) -> Vec<SearchResult> {
        if exact {
            self.exact_search(stems)
        } else {
            self.partial_search(stems)
        }
    }

    pub fn cache_results(&self, query: &str, results: Vec<SearchResult>) -> bool {
        self.queries.write().insert(query, results)
    }

    pub fn cached_results(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.queries.read().get(query).map(<[SearchResult]>::to_vec)
    }

    pub fn is_cached(&self, query: &str) -> bool {
        self.queries.read().contains(query)
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.postings.read().contains_stem(stem)
    }

    pub fn contains_location(&self, stem: &str, location: &str) -> bool {
        self.postings.read().contains_location(stem, location)
    }

    pub fn contains_position(&self, stem: &str, location: &str, position: usize) -> bool {
        self.postings.read().contains_position(stem, location, position)
    }

    pub fn num_stems(&self) -> usize {
        self.postings.read().num_stems()
    }

    pub fn num_positions(&self, stem: &str, location: &str) -> usize {
        self.postings.read().num_positions(stem, location)
    }

    pub fn num_stem_positions(&self, stem: &str) -> usize {
        self.postings.read().num_stem_positions(stem)
    }

    pub fn word_count(&self, location: &str) -> Option<usize> {
        self.counts.read().get(location)
    }

    pub fn stems(&self) -> Vec<String> {
        self.postings.read().stems().map(str::to_string).collect()
    }

    /// Copy out all three parts, one read lock at a time.
    pub fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            postings: self.postings.read().clone(),
            counts: self.counts.read().clone(),
            results: self.queries.read().clone(),
        }
    }

    /// Unwrap into a serial index once no other thread holds a reference.
    pub fn into_serial(self) -> InvertedIndex {
        InvertedIndex {
            postings: self.postings.into_inner(),
            counts: self.counts.into_inner(),
            queries: self.queries.into_inner(),
        }
    }
}

impl From<InvertedIndex> for ConcurrentIndex {
    fn from(index: InvertedIndex) -> Self {
        Self {
            postings: ReadWriteLock::new(index.postings),
            counts: ReadWriteLock::new(index.counts),
            queries: ReadWriteLock::new(index.queries),
        }
    }
}

// The trait takes `&mut self` for mutators; a shared index only ever needs
// `&self`, so both the owned value and a plain reference forward to the
// inherent methods above.
macro_rules! forward_index {
    ($ty:ty) => {
        impl Index for $ty {
            fn add(&mut self, stem: &str, location: &str, position: usize) -> bool {
                ConcurrentIndex::add(self, stem, location, position)
            }

            fn add_all(&mut self, stems: &[String], location: &str, start: usize) -> bool {
                ConcurrentIndex::add_all(self, stems, location, start)
            }

            fn merge(&mut self, other: &InvertedIndex, location: &str) -> bool {
                ConcurrentIndex::merge(self, other, location)
            }

            fn set_word_count(&mut self, location: &str, count: usize) -> bool {
                ConcurrentIndex::set_word_count(self, location, count)
            }

            fn exact_search(&self, stems: &[String]) -> Vec<SearchResult> {
                ConcurrentIndex::exact_search(self, stems)
            }

            fn partial_search(&self, stems: &[String]) -> Vec<SearchResult> {
                ConcurrentIndex::partial_search(self, stems)
            }

            fn cache_results(&mut self, query: &str, results: Vec<SearchResult>) -> bool {
                ConcurrentIndex::cache_results(self, query, results)
            }

            fn cached_results(&self, query: &str) -> Option<Vec<SearchResult>> {
                ConcurrentIndex::cached_results(self, query)
            }

            fn is_cached(&self, query: &str) -> bool {
                ConcurrentIndex::is_cached(self, query)
            }

            fn contains_stem(&self, stem: &str) -> bool {
                ConcurrentIndex::contains_stem(self, stem)
            }

            fn contains_location(&self, stem: &str, location: &str) -> bool {
                ConcurrentIndex::contains_location(self, stem, location)
            }

            fn contains_position(&self, stem: &str, location: &str, position: usize) -> bool {
                ConcurrentIndex::contains_position(self, stem, location, position)
            }

            fn num_stems(&self) -> usize {
                ConcurrentIndex::num_stems(self)
            }

            fn num_positions(&self, stem: &str, location: &str) -> usize {
                ConcurrentIndex::num_positions(self, stem, location)
            }

            fn num_stem_positions(&self, stem: &str) -> usize {
                ConcurrentIndex::num_stem_positions(self, stem)
            }

            fn word_count(&self, location: &str) -> Option<usize> {
                ConcurrentIndex::word_count(self, location)
            }

            fn stems(&self) -> Vec<String> {
                ConcurrentIndex::stems(self)
            }

            fn snapshot(&self) -> IndexSnapshot {
                ConcurrentIndex::snapshot(self)
            }
        }
    };
}

forward_index!(ConcurrentIndex);
forward_index!(&ConcurrentIndex);
