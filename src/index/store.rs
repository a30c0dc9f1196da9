// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The three sub-resources an index is made of.
//!
//! Each one is plain data with no synchronization. The serial index owns them
//! directly; the concurrent index puts each behind its own lock so that, say,
//! recording a word count never waits on a stem lookup.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::search::SearchResult;

/// Positions of one stem, keyed by location.
pub type PositionMap = BTreeMap<String, BTreeSet<usize>>;

/// stem → location → sorted, de-duplicated positions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Postings {
    stems: BTreeMap<String, PositionMap>,
}

impl Postings {
    /// Record one occurrence. Empty stems, empty locations and position 0 are rejected.
    pub fn add(&mut self, stem: &str, location: &str, position: usize) -> bool {
        if stem.is_empty() || location.is_empty() || position == 0 {
            return false;
        }
        self.stems
            .entry(stem.to_string())
            .or_default()
            .entry(location.to_string())
            .or_default()
            .insert(position)
    }

    /// Record `stems` at consecutive positions starting from `start`.
    ///
    /// Stops at the first empty stem. Returns whether any position was new.
    pub fn add_all(&mut self, stems: &[String], location: &str, start: usize) -> bool {
        if location.is_empty() || start == 0 {
            return false;
        }
        let mut changed = false;
        for (offset, stem) in stems.iter().enumerate() {
            if stem.is_empty() {
                break;
            }
            changed |= self.add(stem, location, start + offset);
        }
        changed
    }

    /// Copy every position `other` holds for `location` into this map.
    pub fn merge_location(&mut self, other: &Postings, location: &str) -> bool {
        let mut changed = false;
        for (stem, locations) in &other.stems {
            let Some(positions) = locations.get(location) else {
                continue;
            };
            let target = self
                .stems
                .entry(stem.clone())
                .or_default()
                .entry(location.to_string())
                .or_default();
            let before = target.len();
            target.extend(positions.iter().copied());
            changed |= target.len() != before;
        }
        changed
    }

    pub fn contains_stem(&self, stem: &str) -> bool {
        self.stems.contains_key(stem)
    }

    pub fn contains_location(&self, stem: &str, location: &str) -> bool {
        self.locations(stem)
            .is_some_and(|locations| locations.contains_key(location))
    }

    pub fn contains_position(&self, stem: &str, location: &str, position: usize) -> bool {
        self.positions(stem, location)
            .is_some_and(|positions| positions.contains(&position))
    }

    pub fn locations(&self, stem: &str) -> Option<&PositionMap> {
        self.stems.get(stem)
    }

    pub fn positions(&self, stem: &str, location: &str) -> Option<&BTreeSet<usize>> {
        self.locations(stem)?.get(location)
    }

    pub fn num_stems(&self) -> usize {
        self.stems.len()
    }

    pub fn num_positions(&self, stem: &str, location: &str) -> usize {
        self.positions(stem, location).map_or(0, BTreeSet::len)
    }

    /// Occurrences of `stem` across every location.
    pub fn num_stem_positions(&self, stem: &str) -> usize {
        self.locations(stem)
            .map_or(0, |locations| locations.values().map(BTreeSet::len).sum())
    }

    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.stems.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    /// Per-location match counts for stems that are keys in the map.
    pub fn exact_matches(&self, query: &[String]) -> HashMap<String, usize> {
        let mut matches = HashMap::new();
        for stem in query {
            if let Some(locations) = self.stems.get(stem) {
                tally(&mut matches, locations);
            }
        }
        matches
    }

    /// Per-location match counts for every stored stem that starts with a query stem.
    ///
    /// This walks the whole vocabulary. A stored stem equal to a query stem
    /// matches too, and a stored stem that extends two query stems is counted
    /// once for each.
    pub fn partial_matches(&self, query: &[String]) -> HashMap<String, usize> {
        let mut matches = HashMap::new();
        for (stored, locations) in &self.stems {
            for stem in query {
                if stored.starts_with(stem.as_str()) {
                    tally(&mut matches, locations);
                }
            }
        }
        matches
    }
}

fn tally(matches: &mut HashMap<String, usize>, locations: &PositionMap) {
    for (location, positions) in locations {
        *matches.entry(location.clone()).or_insert(0) += positions.len();
    }
}

/// location → total token count. The first write for a location wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WordCounts {
    counts: BTreeMap<String, usize>,
}

impl WordCounts {
    /// Store a count unless the location already has one. Zero counts are ignored.
    pub fn set(&mut self, location: &str, count: usize) -> bool {
        if location.is_empty() || count == 0 || self.counts.contains_key(location) {
            return false;
        }
        self.counts.insert(location.to_string(), count);
        true
    }

    pub fn get(&self, location: &str) -> Option<usize> {
        self.counts.get(location).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(location, count)| (location.as_str(), *count))
    }
}

/// canonical query → ranked results. The first write for a query wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryCache {
    queries: BTreeMap<String, Vec<SearchResult>>,
}

impl QueryCache {
    pub fn insert(&mut self, query: &str, results: Vec<SearchResult>) -> bool {
        if query.is_empty() || self.queries.contains_key(query) {
            return false;
        }
        self.queries.insert(query.to_string(), results);
        true
    }

    pub fn get(&self, query: &str) -> Option<&[SearchResult]> {
        self.queries.get(query).map(Vec::as_slice)
    }

    pub fn contains(&self, query: &str) -> bool {
        self.queries.contains_key(query)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SearchResult])> {
        self.queries
            .iter()
            .map(|(query, results)| (query.as_str(), results.as_slice()))
    }
}

/// Owned copy of everything an index holds, in output order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IndexSnapshot {
    pub postings: Postings,
    pub counts: WordCounts,
    pub results: QueryCache,
}
