// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word cleaning and Snowball English stemming.
//!
//! # Pipeline
//!
//! 1. NFD normalize so accented letters split into base + combining mark
//! 2. Drop everything that is neither alphabetic nor whitespace
//!    (digits, punctuation, the combining marks from step 1)
//! 3. Lowercase
//! 4. Split on whitespace
//! 5. Stem each word
//!
//! "Café's 2 RUNNERS!" becomes `["cafe", "runner"]`.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

static ENGLISH: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Strip diacritics and non-letters, then lowercase.
pub fn clean(text: &str) -> String {
    text.nfd()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Cleaned words of `text`, in order.
pub fn parse(text: &str) -> Vec<String> {
    clean(text).split_whitespace().map(str::to_string).collect()
}

/// Stem a single already-cleaned word.
pub fn stem_word(word: &str) -> String {
    ENGLISH.stem(word).into_owned()
}

/// Stems of `text`, in order, duplicates kept.
pub fn list_stems(text: &str) -> Vec<String> {
    clean(text).split_whitespace().map(stem_word).collect()
}

/// Distinct stems of `text`, sorted.
pub fn unique_stems(text: &str) -> BTreeSet<String> {
    clean(text).split_whitespace().map(stem_word).collect()
}

/// Stems of every line of a file, in order.
pub fn stem_file(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut stems = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|e| Error::io(path, e))?;
        stems.extend(list_stems(&line));
    }
    Ok(stems)
}
