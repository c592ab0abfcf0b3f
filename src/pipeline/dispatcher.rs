//! Work dispatcher: fan candidates out over a fixed pool of worker threads.
//!
//! Exactly `workers` threads pull from a bounded channel with `workers` slots,
//! so no more than `workers` units ever execute past admission, and the
//! enqueuing send is the single point that blocks when all slots are busy.
//! A unit that fails only ends itself; the pool keeps draining.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::bounded;
use log::debug;

use crate::progress::Progress;
use crate::store::ImageStore;
use crate::types::{Candidate, Summary};

use super::unit::process_candidate;

/// Process every candidate with at most `workers` in flight, then join.
///
/// Returns only after every admitted unit has finished; completion order
/// between files is not defined. `workers` is floored at 1 so admission can
/// never deadlock on a zero-capacity pool.
pub fn run(
    candidates: Vec<Candidate>,
    store: Arc<dyn ImageStore>,
    workers: usize,
    progress: &Progress,
) -> Summary {
    let workers = workers.max(1);
    let total = candidates.len() as u64;
    debug!("Dispatching {} candidates across {} workers", total, workers);

    // Capacity = worker count: the channel is the admission resource. Senders
    // block once every worker is busy and the buffer holds one spare per slot.
    let (candidate_tx, candidate_rx) = bounded::<Candidate>(workers);

    thread::scope(|scope| {
        for _ in 0..workers {
            let candidate_rx = candidate_rx.clone();
            let store = Arc::clone(&store);
            scope.spawn(move || {
                while let Ok(candidate) = candidate_rx.recv() {
                    process_candidate(&candidate, store.as_ref(), progress, total);
                }
            });
        }
        drop(candidate_rx);

        for candidate in candidates {
            if candidate_tx.send(candidate).is_err() {
                break;
            }
        }
        // Closing the channel is what lets workers exit; the scope then joins
        // every worker before run() returns.
        drop(candidate_tx);
    });

    progress.summary(total)
}
