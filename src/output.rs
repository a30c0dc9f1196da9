// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pretty-printed JSON output.
//!
//! | File    | Shape                                             |
//! |---------|---------------------------------------------------|
//! | index   | `{stem: {location: [position, ...]}}`             |
//! | counts  | `{location: count}`                               |
//! | results | `{query: [{"where": ..., "count": ..., "score": ...}]}` |
//!
//! Keys come out sorted because every map underneath is a `BTreeMap`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::index::{Postings, QueryCache, WordCounts};

/// Serialize `value` as pretty JSON into `path`, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote json");
    Ok(())
}

pub fn write_index(path: &Path, postings: &Postings) -> Result<()> {
    write_json(path, postings)
}

pub fn write_counts(path: &Path, counts: &WordCounts) -> Result<()> {
    write_json(path, counts)
}

pub fn write_results(path: &Path, results: &QueryCache) -> Result<()> {
    write_json(path, results)
}
