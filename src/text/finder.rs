// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::TEXT_EXTENSIONS;
use crate::error::{Error, Result};

/// True for paths ending in `.txt` or `.text`, any case.
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|wanted| ext.eq_ignore_ascii_case(wanted))
        })
}

/// Every text file under `root`, following symlinks, in file-name order.
///
/// A root that is itself a file is returned as-is when it has a text
/// extension. Entries below the root that cannot be read are logged and
/// skipped; a root that cannot be walked at all is [`Error::Walk`].
pub fn list_text_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::Walk {
                    path: root.to_path_buf(),
                    source: e,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_text_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!(root = %root.display(), files = files.len(), "listed text files");
    Ok(files)
}
