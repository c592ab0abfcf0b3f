//! Imgstash CLI: connect, ingest, report, exit.
//!
//! Exit-code mapping lives here and nowhere else: a fatal bootstrap error
//! (config, connection, schema, directory) propagates out of main and exits
//! non-zero; a run that reaches the dispatcher join exits zero even when
//! some files failed.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use imgstash::cli::Cli;
use imgstash::store::{self, ImageStore, InsertOnlyStore, StoreConfig, UpsertStore};
use imgstash::utils::setup_logging;
use imgstash::{ingest_dir, report, IngestOpts};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let handle = store::connect(&StoreConfig::new(cli.db_path()))?;

    let writer: Arc<dyn ImageStore> = if cli.insert_only {
        Arc::new(InsertOnlyStore::new(handle.clone()))
    } else {
        Arc::new(UpsertStore::new(handle.clone()))
    };

    let opts = IngestOpts {
        workers: cli.worker_limit(),
    };
    let summary = ingest_dir(&cli.image_dir(), writer, &opts)?;
    report(&summary);

    store::close(Some(handle));
    Ok(())
}
