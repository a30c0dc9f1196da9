// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Serial inverted index.

use super::{Index, IndexSnapshot, Postings, QueryCache, WordCounts};
use crate::search::{rank, SearchResult};

/// Single-threaded index. Also the per-file scratch index that workers build
/// privately before merging into a shared [`ConcurrentIndex`](super::ConcurrentIndex).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvertedIndex {
    pub(crate) postings: Postings,
    pub(crate) counts: WordCounts,
    pub(crate) queries: QueryCache,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn postings(&self) -> &Postings {
        &self.postings
    }

    pub fn counts(&self) -> &WordCounts {
        &self.counts
    }

    pub fn queries(&self) -> &QueryCache {
        &self.queries
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl Index for InvertedIndex {
    fn add(&mut self, stem: &str, location: &str, position: usize) -> bool {
        self.postings.add(stem, location, position)
    }

    fn add_all(&mut self, stems: &[String], location: &str, start: usize) -> bool {
        self.postings.add_all(stems, location, start)
    }

    fn merge(&mut self, other: &InvertedIndex, location: &str) -> bool {
        self.postings.merge_location(&other.postings, location)
    }

    fn set_word_count(&mut self, location: &str, count: usize) -> bool {
        self.counts.set(location, count)
    }

    fn exact_search(&self, stems: &[String]) -> Vec<SearchResult> {
        rank(self.postings.exact_matches(stems), |location| {
            self.counts.get(location)
        })
    }

    fn partial_search(&self, stems: &[String]) -> Vec<SearchResult> {
        rank(self.postings.partial_matches(stems), |location| {
            self.counts.get(location)
        })
    }

    fn cache_results(&mut self, query: &str, results: Vec<SearchResult>) -> bool {
        self.queries.insert(query, results)
    }

    fn cached_results(&self, query: &str) -> Option<Vec<SearchResult>> {
        self.queries.get(query).map(<[SearchResult]>::to_vec)
    }

    fn is_cached(&self, query: &str) -> bool {
        self.queries.contains(query)
    }

    fn contains_stem(&self, stem: &str) -> bool {
        self.postings.contains_stem(stem)
    }

    fn contains_location(&self, stem: &str, location: &str) -> bool {
        self.postings.contains_location(stem, location)
    }

    fn contains_position(&self, stem: &str, location: &str, position: usize) -> bool {
        self.postings.contains_position(stem, location, position)
    }

    fn num_stems(&self) -> usize {
        self.postings.num_stems()
    }

    fn num_positions(&self, stem: &str, location: &str) -> usize {
        self.postings.num_positions(stem, location)
    }

    fn num_stem_positions(&self, stem: &str) -> usize {
        self.postings.num_stem_positions(stem)
    }

    fn word_count(&self, location: &str) -> Option<usize> {
        self.counts.get(location)
    }

    fn stems(&self) -> Vec<String> {
        self.postings.stems().map(str::to_string).collect()
    }

    fn snapshot(&self) -> IndexSnapshot {
        IndexSnapshot {
            postings: self.postings.clone(),
            counts: self.counts.clone(),
            results: self.queries.clone(),
        }
    }
}
