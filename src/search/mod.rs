// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation: lines in, ranked results in the cache.
//!
//! A query line is reduced to its canonical form (distinct stems, sorted,
//! space-joined). That string is the cache key, so "Running dogs" and
//! "dog run" share one entry and are only ever searched once.

mod query;
mod result;

pub use query::{
    canonical_query, evaluate_line, evaluate_queries, evaluate_queries_parallel,
    read_query_file, CanonicalQuery,
};
pub use result::{compare_results, rank, SearchResult};
