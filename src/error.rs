//! Error taxonomy: fatal pre-work errors vs per-file errors.
//!
//! Fatal errors abort the whole run before any file is processed and are
//! mapped to a non-zero exit in `main`. Per-file errors are absorbed inside
//! the dispatcher's unit of work and only show up as log lines and counters.

use std::path::PathBuf;

/// Aborts the entire run. Nothing has been written when one of these is
/// returned from the bootstrap phase.
#[derive(Debug, thiserror::Error)]
pub enum FatalError {
    /// Missing or invalid store configuration. Never retried.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// Could not establish and verify a store connection within the retry budget.
    #[error("store unreachable after {attempts} attempts: {last_error}")]
    Connection { attempts: usize, last_error: String },

    /// The filename uniqueness constraint could not be ensured.
    #[error("failed to ensure images schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// The source directory could not be opened or read.
    #[error("cannot read source directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Terminates only the one unit of work that hit it; siblings keep running.
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("stat failed: {0}")]
    Stat(#[source] std::io::Error),

    #[error("content sniffing failed: {0}")]
    Classify(#[source] std::io::Error),

    #[error("store write failed: {0}")]
    Write(#[from] WriteError),
}

/// A store write that failed for a reason other than a duplicate filename.
/// Uniqueness violations are translated to `WriteOutcome::Duplicate` by the
/// backends, so they never appear here.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct WriteError(#[from] pub rusqlite::Error);
