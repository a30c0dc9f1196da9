// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for index mutation and search.
//!
//! Random add/merge/count sequences must keep positions de-duplicated and
//! rankings strictly ordered.

#![no_main]

use std::cmp::Ordering;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stemdex::search::compare_results;
use stemdex::{Index, InvertedIndex};

#[derive(Arbitrary, Debug)]
enum Op {
    Add { stem: u8, location: u8, position: u8 },
    Count { location: u8, count: u8 },
    Merge { location: u8 },
}

const STEMS: &[&str] = &["run", "runner", "ru", "walk", ""];
const LOCATIONS: &[&str] = &["a", "B", "b", ""];

fuzz_target!(|ops: Vec<Op>| {
    let mut index = InvertedIndex::new();
    let mut scratch = InvertedIndex::new();

    for op in ops.iter().take(256) {
        match *op {
            Op::Add { stem, location, position } => {
                let stem = STEMS[stem as usize % STEMS.len()];
                let location = LOCATIONS[location as usize % LOCATIONS.len()];
                let added = index.add(stem, location, position as usize);
                if stem.is_empty() || location.is_empty() || position == 0 {
                    assert!(!added);
                }
                scratch.add(stem, location, position as usize);
            }
            Op::Count { location, count } => {
                let location = LOCATIONS[location as usize % LOCATIONS.len()];
                let before = index.word_count(location);
                index.set_word_count(location, count as usize);
                if before.is_some() {
                    assert_eq!(index.word_count(location), before);
                }
            }
            Op::Merge { location } => {
                let location = LOCATIONS[location as usize % LOCATIONS.len()];
                index.merge(&scratch, location);
            }
        }
    }

    for exact in [true, false] {
        let results = index.search(&["run".to_string()], exact);
        for pair in results.windows(2) {
            assert_eq!(compare_results(&pair[0], &pair[1]), Ordering::Less);
        }
        for result in &results {
            assert!(result.count > 0);
            assert!(result.score > 0.0);
        }
    }
});
