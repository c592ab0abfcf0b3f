//! Directory scan: flat listing of ingestion candidates.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FatalError;
use crate::types::Candidate;
use crate::utils::config::PLACEHOLDER_NAME;

/// List the immediate entries of `dir` that are eligible for ingestion.
///
/// Sub-directories, dot-prefixed names, and the [`PLACEHOLDER_NAME`] marker
/// are filtered out. Order follows the directory listing; no sorting. An
/// unreadable directory is a [`FatalError::Directory`]; an empty result is a
/// successful no-op for the caller.
pub fn scan(dir: &Path) -> Result<Vec<Candidate>, FatalError> {
    let mut candidates = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| FatalError::Directory {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || name == PLACEHOLDER_NAME {
            continue;
        }
        candidates.push(Candidate {
            path: entry.into_path(),
            name,
        });
    }
    Ok(candidates)
}
