//! Top-level ingestion run: scan, dispatch, summarize.

use std::path::Path;
use std::sync::Arc;

use log::info;

use crate::error::FatalError;
use crate::pipeline;
use crate::progress::Progress;
use crate::scanner::scan;
use crate::store::ImageStore;
use crate::types::{IngestOpts, Summary};
use crate::utils::config::default_workers;

/// Ingest every eligible file directly under `dir` into `store`.
///
/// Fatal errors (unreadable directory) abort before any file is processed.
/// Per-file failures are isolated and only visible in the summary counters
/// and log lines; the run itself still succeeds.
pub fn ingest_dir(
    dir: &Path,
    store: Arc<dyn ImageStore>,
    opts: &IngestOpts,
) -> Result<Summary, FatalError> {
    info!("Scanning for images in {}", dir.display());
    let candidates = scan(dir)?;

    let progress = Progress::new();
    if candidates.is_empty() {
        info!("No files to ingest");
        return Ok(progress.summary(0));
    }

    let workers = opts.workers.unwrap_or_else(default_workers).max(1);
    info!(
        "Found {} files; ingesting with {} workers",
        candidates.len(),
        workers
    );
    Ok(pipeline::run(candidates, store, workers, &progress))
}

/// Log the end-of-run summary lines.
pub fn report(summary: &Summary) {
    info!("----- Ingestion run complete -----");
    info!("Files found:      {}", summary.total);
    info!("Recorded:         {}", summary.succeeded);
    info!("Skipped (non-image): {}", summary.skipped);
    info!("Failed:           {}", summary.failed);
    info!("Elapsed:          {:?}", summary.elapsed);
    info!("Throughput:       {:.2} files/sec", summary.files_per_sec());
}
