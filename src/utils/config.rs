//! Application configuration: environment loading and tuning constants.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable names accepted as flag fallbacks.
pub struct EnvKeys;

impl EnvKeys {
    /// Store database path.
    pub const DB: &'static str = "IMGSTASH_DB";
    /// Source directory with images to ingest.
    pub const DIR: &'static str = "IMGSTASH_DIR";
    /// Worker concurrency limit.
    pub const WORKERS: &'static str = "IMGSTASH_WORKERS";
}

/// Read an env key: process environment first, then a `.env` file in `dir`.
pub fn env_or_dotenv(key: &str, dir: &Path) -> Option<String> {
    if let Ok(s) = std::env::var(key) {
        let s = s.trim().to_string();
        if !s.is_empty() {
            return Some(s);
        }
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Ok(s) = std::env::var(key) {
            let s = s.trim().to_string();
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

// ---- Store connection ----

/// Retry budget for the connect-and-ping bootstrap.
#[derive(Clone, Copy, Debug)]
pub struct ConnectTuning {
    /// Total attempts before giving up.
    pub max_retries: usize,
    /// Wait between attempts.
    pub retry_delay: Duration,
    /// Per-attempt bound, applied as the SQLite busy timeout.
    pub attempt_timeout: Duration,
}

impl Default for ConnectTuning {
    fn default() -> Self {
        Self {
            max_retries: Self::MAX_RETRIES,
            retry_delay: Self::RETRY_DELAY,
            attempt_timeout: Self::ATTEMPT_TIMEOUT,
        }
    }
}

impl ConnectTuning {
    pub const MAX_RETRIES: usize = 5;
    pub const RETRY_DELAY: Duration = Duration::from_secs(5);
    pub const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);
}

// ---- Scanning ----

/// Placeholder file kept in otherwise-empty tracked directories; never ingested.
pub const PLACEHOLDER_NAME: &str = ".gitkeep";

// ---- Classification ----

/// How many leading bytes to sniff. Matches the 512-byte window every common
/// image signature fits in.
pub const SNIFF_LEN: usize = 512;

/// Only content types with this prefix are written to the store.
pub const IMAGE_PREFIX: &str = "image/";

// ---- Workers ----

/// Default worker count: host parallelism, never below 1 (zero workers would
/// block every admission forever).
pub fn default_workers() -> usize {
    rayon::current_num_threads().max(1)
}

/// Default image source directory when neither flag nor env is set.
pub fn default_image_dir() -> PathBuf {
    PathBuf::from("./images/upload")
}
