//! Public types for the imgstash API and pipeline.

use std::path::PathBuf;
use std::time::Duration;

/// A discovered file eligible for ingestion, not yet processed.
/// Produced by the scanner, consumed by exactly one worker.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Absolute or caller-relative path to the file.
    pub path: PathBuf,
    /// Bare file name; the natural key in the store.
    pub name: String,
}

/// Fields written for one image. `created_at`/`updated_at` are set by the store.
#[derive(Clone, Debug)]
pub struct NewImage {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
    pub source_path: String,
}

/// One persisted row, as read back from the `images` table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredImage {
    pub filename: String,
    pub size: u64,
    pub content_type: String,
    pub source_path: String,
    /// Nanoseconds since epoch, set once on first insert.
    pub created_at: i64,
    /// Nanoseconds since epoch, refreshed on every successful write.
    pub updated_at: i64,
}

/// Result of one store write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// New row inserted.
    Created,
    /// Existing row for this filename updated in place.
    Updated,
    /// Insert-only backend hit the uniqueness constraint; nothing written.
    Duplicate,
}

/// Options for [`ingest_dir`](crate::ingest_dir).
#[derive(Clone, Debug, Default)]
pub struct IngestOpts {
    /// Worker count. When None, derived from host parallelism (floor 1).
    pub workers: Option<usize>,
}

/// End-of-run totals. `failed` includes duplicate-filename outcomes from the
/// insert-only backend; `skipped` is non-image files, which are not errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    pub succeeded: u64,
    pub skipped: u64,
    pub failed: u64,
    pub elapsed: Duration,
}

impl Summary {
    /// Successful writes per second of wall-clock time. Zero when the run
    /// took no measurable time, so short runs never divide by zero.
    pub fn files_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.succeeded as f64 / secs
        } else {
            0.0
        }
    }
}
