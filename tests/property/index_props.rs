//! Index invariants under random insertion.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;
use stemdex::{Index, InvertedIndex};

// ============================================================================
// STRATEGIES
// ============================================================================

fn stem_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["run", "runner", "walk", "walker", "dog", "do", "cat"])
        .prop_map(str::to_string)
}

fn location_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a.txt", "b.txt", "C.txt", "https://x.test/"]).prop_map(str::to_string)
}

/// Random (stem, location, position) insertions, duplicates likely.
fn inserts_strategy() -> impl Strategy<Value = Vec<(String, String, usize)>> {
    prop::collection::vec((stem_strategy(), location_strategy(), 1usize..30), 0..80)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    /// Property: positions are a set, so repeats never inflate counts.
    #[test]
    fn prop_positions_are_distinct(inserts in inserts_strategy()) {
        let mut index = InvertedIndex::new();
        let mut expected: HashMap<(String, String), BTreeSet<usize>> = HashMap::new();
        for (stem, location, position) in &inserts {
            let fresh = expected
                .entry((stem.clone(), location.clone()))
                .or_default()
                .insert(*position);
            prop_assert_eq!(index.add(stem, location, *position), fresh);
        }

        for ((stem, location), positions) in &expected {
            prop_assert_eq!(index.num_positions(stem, location), positions.len());
            for position in positions {
                prop_assert!(index.contains_position(stem, location, *position));
            }
        }
        let stems: BTreeSet<&String> = expected.keys().map(|(stem, _)| stem).collect();
        prop_assert_eq!(index.num_stems(), stems.len());
    }

    /// Property: exact counts equal stored positions per location.
    #[test]
    fn prop_exact_counts_match_positions(inserts in inserts_strategy(), query in stem_strategy()) {
        let mut index = InvertedIndex::new();
        for (stem, location, position) in &inserts {
            index.add(stem, location, *position);
        }

        let results = index.exact_search(std::slice::from_ref(&query));
        let total: usize = results.iter().map(|r| r.count).sum();
        prop_assert_eq!(total, index.num_stem_positions(&query));
        for result in &results {
            prop_assert_eq!(result.count, index.num_positions(&query, &result.location));
        }
    }

    /// Property: partial search finds everything exact search finds, and at
    /// least as many occurrences.
    #[test]
    fn prop_partial_covers_exact(inserts in inserts_strategy(), query in stem_strategy()) {
        let mut index = InvertedIndex::new();
        for (stem, location, position) in &inserts {
            index.add(stem, location, *position);
        }

        let stems = vec![query];
        let exact = index.exact_search(&stems);
        let partial = index.partial_search(&stems);
        let partial_counts: HashMap<&str, usize> = partial
            .iter()
            .map(|r| (r.location.as_str(), r.count))
            .collect();
        for result in &exact {
            let count = partial_counts.get(result.location.as_str()).copied();
            prop_assert!(count.is_some_and(|count| count >= result.count));
        }
    }

    /// Property: merging per-location scratch indexes equals adding directly.
    #[test]
    fn prop_merge_equals_direct_add(inserts in inserts_strategy()) {
        let mut direct = InvertedIndex::new();
        let mut scratch: HashMap<String, InvertedIndex> = HashMap::new();
        for (stem, location, position) in &inserts {
            direct.add(stem, location, *position);
            scratch
                .entry(location.clone())
                .or_default()
                .add(stem, location, *position);
        }

        let mut merged = InvertedIndex::new();
        for (location, local) in &scratch {
            merged.merge(local, location);
        }
        prop_assert_eq!(merged.postings(), direct.postings());
    }
}
