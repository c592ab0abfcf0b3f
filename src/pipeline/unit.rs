//! One unit of work: stat, classify, write, record the outcome.

use log::{info, warn};

use crate::classify::classify;
use crate::error::UnitError;
use crate::progress::Progress;
use crate::store::ImageStore;
use crate::types::{Candidate, NewImage, WriteOutcome};
use crate::utils::config::IMAGE_PREFIX;

/// How one candidate finished. Returned for tests; the dispatcher only cares
/// that the unit came back at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitOutcome {
    Succeeded,
    Skipped,
    Failed,
}

/// Run the full per-file sequence for one candidate. Every outcome, including
/// failure, is absorbed here: logged once, counted once, never propagated to
/// sibling units.
pub fn process_candidate(
    candidate: &Candidate,
    store: &dyn ImageStore,
    progress: &Progress,
    total: u64,
) -> UnitOutcome {
    progress.record_attempt();
    match ingest_one(candidate, store) {
        Ok(Ingested::Written(outcome)) => {
            let done = progress.record_success();
            info!(
                "({}/{}) Recorded {} ({:?})",
                done, total, candidate.name, outcome
            );
            UnitOutcome::Succeeded
        }
        Ok(Ingested::NotAnImage(content_type)) => {
            progress.record_skip();
            warn!(
                "Skipping {}: not an image ({})",
                candidate.name, content_type
            );
            UnitOutcome::Skipped
        }
        Ok(Ingested::Duplicate) => {
            progress.record_failure();
            warn!(
                "Filename {} already recorded; insert-only store left it alone",
                candidate.name
            );
            UnitOutcome::Failed
        }
        Err(err) => {
            progress.record_failure();
            warn!("Failed to ingest {}: {}", candidate.name, err);
            UnitOutcome::Failed
        }
    }
}

enum Ingested {
    Written(WriteOutcome),
    NotAnImage(String),
    Duplicate,
}

fn ingest_one(candidate: &Candidate, store: &dyn ImageStore) -> Result<Ingested, UnitError> {
    let meta = std::fs::metadata(&candidate.path).map_err(UnitError::Stat)?;
    let size = meta.len();

    let content_type = classify(&candidate.path).map_err(UnitError::Classify)?;
    if !content_type.starts_with(IMAGE_PREFIX) {
        return Ok(Ingested::NotAnImage(content_type));
    }

    let image = NewImage {
        filename: candidate.name.clone(),
        size,
        content_type,
        source_path: candidate.path.to_string_lossy().to_string(),
    };
    match store.write(&image)? {
        WriteOutcome::Duplicate => Ok(Ingested::Duplicate),
        outcome => Ok(Ingested::Written(outcome)),
    }
}
