//! Imgstash: batch image ingester with a bounded worker pool.
//!
//! Scans the immediate entries of a directory, sniffs each file's true
//! content type from its leading bytes, and upserts one metadata row per
//! filename into a SQLite store. Per-file failures are isolated; the store
//! connection is established once with bounded retry and passed explicitly
//! to everything that needs it.

pub mod classify;
pub mod cli;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod store;
pub mod types;
pub mod utils;

pub use error::{FatalError, UnitError, WriteError};
pub use ingest::{ingest_dir, report};
pub use types::*;
