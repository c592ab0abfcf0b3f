//! Bounded-concurrency pipeline: dispatcher and per-file unit of work.

pub mod dispatcher;
pub mod unit;

pub use dispatcher::run;
pub use unit::{process_candidate, UnitOutcome};
