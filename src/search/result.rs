// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search results and the order they are ranked in.
//!
//! A result is one location that matched at least one query stem. Its score is
//! the fraction of the location's tokens that matched, so a short page that
//! mentions the query twice outranks a long one that mentions it three times.
//!
//! Sort order:
//! 1. **Score** descending
//! 2. **Count** descending
//! 3. **Location** ascending, ignoring case
//! 4. **Location** ascending, byte-wise, so the order is total

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// File path or URL that matched.
    #[serde(rename = "where")]
    pub location: String,
    /// Matching stem occurrences in the location.
    pub count: usize,
    /// `count / word_count(location)`.
    pub score: f64,
}

impl SearchResult {
    /// Build a result, dividing by 1 when the location has no recorded word count.
    pub fn new(location: impl Into<String>, count: usize, word_count: usize) -> Self {
        Self {
            location: location.into(),
            count,
            score: count as f64 / word_count.max(1) as f64,
        }
    }
}

// Scores are finite: counts are non-negative and the divisor is at least 1.
impl Eq for SearchResult {}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_results(self, other)
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two results for ranking; `Less` means `a` ranks first.
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| compare_ignore_case(&a.location, &b.location))
        .then_with(|| a.location.cmp(&b.location))
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Turn per-location match counts into a ranked result list.
pub fn rank<F>(matches: HashMap<String, usize>, word_count: F) -> Vec<SearchResult>
where
    F: Fn(&str) -> Option<usize>,
{
    let mut results: Vec<SearchResult> = matches
        .into_iter()
        .map(|(location, count)| {
            let total = word_count(&location).unwrap_or(1);
            SearchResult::new(location, count, total)
        })
        .collect();
    results.sort_unstable();
    results
}
