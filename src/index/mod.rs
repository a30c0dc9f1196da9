// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: stems to locations to positions.
//!
//! Two implementations share one operation set:
//! - **InvertedIndex**: serial core, plain owned maps
//! - **ConcurrentIndex**: the same maps, each behind its own [`ReadWriteLock`]
//!
//! Builders and the query evaluator are generic over [`Index`], so the session
//! picks serial or concurrent once and everything downstream follows.
//!
//! [`ReadWriteLock`]: crate::concurrency::ReadWriteLock

mod concurrent;
mod inverted;
mod store;

pub use concurrent::ConcurrentIndex;
pub use inverted::InvertedIndex;
pub use store::{IndexSnapshot, PositionMap, Postings, QueryCache, WordCounts};

use crate::search::SearchResult;

/// Operations every index supports.
///
/// Mutators return whether they changed anything. Invalid input (an empty
/// stem or location, position 0) is rejected by returning `false`.
pub trait Index {
    /// Record one stem occurrence at a 1-based position.
    fn add(&mut self, stem: &str, location: &str, position: usize) -> bool;

    /// Record `stems` at consecutive positions from `start`.
    fn add_all(&mut self, stems: &[String], location: &str, start: usize) -> bool;

    /// Import every position `other` holds for `location`.
    fn merge(&mut self, other: &InvertedIndex, location: &str) -> bool;

    /// Store the token count for a location. Only the first write sticks.
    fn set_word_count(&mut self, location: &str, count: usize) -> bool;

    /// Locations containing any query stem verbatim, ranked.
    fn exact_search(&self, stems: &[String]) -> Vec<SearchResult>;

    /// Locations containing any stem that starts with a query stem, ranked.
    fn partial_search(&self, stems: &[String]) -> Vec<SearchResult>;

    fn search(&self, stems: &[String], exact: bool) -> Vec<SearchResult> {
        if exact {
            self.exact_search(stems)
        } else {
            self.partial_search(stems)
        }
    }

    /// Remember the results for a canonical query. Only the first write sticks.
    fn cache_results(&mut self, query: &str, results: Vec<SearchResult>) -> bool;

    fn cached_results(&self, query: &str) -> Option<Vec<SearchResult>>;

    fn is_cached(&self, query: &str) -> bool {
        self.cached_results(query).is_some()
    }

    fn contains_stem(&self, stem: &str) -> bool;
    fn contains_location(&self, stem: &str, location: &str) -> bool;
    fn contains_position(&self, stem: &str, location: &str, position: usize) -> bool;

    fn num_stems(&self) -> usize;
    fn num_positions(&self, stem: &str, location: &str) -> usize;
    fn num_stem_positions(&self, stem: &str) -> usize;

    fn word_count(&self, location: &str) -> Option<usize>;

    /// Every stem, sorted.
    fn stems(&self) -> Vec<String>;

    fn snapshot(&self) -> IndexSnapshot;
}
