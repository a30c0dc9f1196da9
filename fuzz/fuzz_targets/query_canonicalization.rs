// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query line canonicalization.
//!
//! Emoji, combining marks, RTL text and null bytes all go through NFD, the
//! letter filter and the stemmer. The key must stay sorted and de-duplicated.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stemdex::canonical_query;

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);
    let Some(query) = canonical_query(&line) else {
        return;
    };

    let stems = query.stems();
    assert!(!stems.is_empty());
    assert!(stems.iter().all(|stem| !stem.is_empty()));
    assert!(stems.windows(2).all(|pair| pair[0] < pair[1]), "unsorted: {stems:?}");
    assert_eq!(query.key(), stems.join(" "));
    assert!(!query.key().chars().any(char::is_uppercase));
});
