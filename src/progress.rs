//! Run counters, safe under concurrent increments from every worker.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::types::Summary;

/// Monotonic per-run counters. One increment per finishing unit; relaxed
/// ordering is enough because the final read happens after the full join.
pub struct Progress {
    attempted: AtomicU64,
    succeeded: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    started: Instant,
}

impl Progress {
    pub fn new() -> Self {
        Self {
            attempted: AtomicU64::new(0),
            succeeded: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn record_attempt(&self) {
        self.attempted.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the new succeeded count, for `(n/total)` progress lines.
    pub fn record_success(&self) -> u64 {
        self.succeeded.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters into a [`Summary`]. Call after the dispatcher
    /// join; `total` is the candidate count from the scanner.
    pub fn summary(&self, total: u64) -> Summary {
        Summary {
            total,
            succeeded: self.succeeded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            elapsed: self.started.elapsed(),
        }
    }

    pub fn attempted(&self) -> u64 {
        self.attempted.load(Ordering::Relaxed)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new()
    }
}
