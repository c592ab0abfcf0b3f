//! Command-line interface and environment-derived defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::utils::config::{default_image_dir, env_or_dotenv, EnvKeys};

/// Batch image ingester: record image metadata in SQLite, one row per filename.
#[derive(Clone, Parser)]
#[command(name = "imgstash")]
#[command(about = "Ingest a directory of images into a SQLite metadata store.")]
pub struct Cli {
    /// Directory with image files. Falls back to IMGSTASH_DIR, then ./images/upload.
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Path to the metadata database. Falls back to IMGSTASH_DB, then imgstash.db in DIR.
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Worker concurrency limit. Falls back to IMGSTASH_WORKERS, then host parallelism.
    #[arg(long, short)]
    pub workers: Option<usize>,

    /// Use plain INSERT instead of upsert: existing filenames are reported as
    /// duplicates and left untouched.
    #[arg(long)]
    pub insert_only: bool,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Source directory: flag, then env (including a `.env` next to the cwd),
    /// then the conventional default.
    pub fn image_dir(&self) -> PathBuf {
        self.dir
            .clone()
            .or_else(|| env_or_dotenv(EnvKeys::DIR, &PathBuf::from(".")).map(PathBuf::from))
            .unwrap_or_else(default_image_dir)
    }

    /// Database path: flag, then env, then `imgstash.db` inside the source dir.
    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .or_else(|| env_or_dotenv(EnvKeys::DB, &self.image_dir()).map(PathBuf::from))
            .unwrap_or_else(|| self.image_dir().join("imgstash.db"))
    }

    /// Worker limit: flag, then env (ignoring unparsable values).
    pub fn worker_limit(&self) -> Option<usize> {
        self.workers.or_else(|| {
            env_or_dotenv(EnvKeys::WORKERS, &self.image_dir()).and_then(|s| s.parse().ok())
        })
    }
}
