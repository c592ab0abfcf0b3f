//! Store bootstrap: open, ping, retry, and ensure the schema.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, info, warn};
use rusqlite::Connection;

use crate::error::FatalError;
use crate::utils::config::ConnectTuning;

use super::{SCHEMA, UNIQUE_INDEX_SQL};

/// Connection parameters for the metadata store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Database file path (`:memory:` is accepted for tests).
    pub db_path: PathBuf,
    /// Retry budget for the bootstrap.
    pub tuning: ConnectTuning,
}

impl StoreConfig {
    pub fn new(db_path: PathBuf) -> Self {
        Self {
            db_path,
            tuning: ConnectTuning::default(),
        }
    }

    fn validate(&self) -> Result<(), FatalError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(FatalError::Config(
                "store database path is not set".to_string(),
            ));
        }
        if self.tuning.max_retries == 0 {
            return Err(FatalError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Shared handle to the open store. Cheap to clone; every clone refers to the
/// same connection. Workers serialize on the inner lock, which is exactly the
/// thread-safety contract this backend provides.
#[derive(Clone)]
pub struct StoreHandle {
    conn: Arc<Mutex<Connection>>,
}

impl StoreHandle {
    /// Lock the underlying connection for one operation.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        // A worker that panicked mid-write is the only way this poisons, and
        // workers absorb their own errors, so unwrap here is an invariant.
        self.conn.lock().unwrap()
    }

    /// In-memory store with the schema applied. Test and tooling entry point;
    /// skips the retry bootstrap entirely.
    pub fn in_memory() -> rusqlite::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        conn.execute(UNIQUE_INDEX_SQL, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Open and verify the store, then ensure the images schema. Fatal on bad
/// config (no retry), on retry exhaustion, and on schema failure.
///
/// Each attempt opens the database and pings it with `SELECT 1`; an attempt
/// that opened but failed the ping releases its connection before the next
/// try. Attempts are spaced by `tuning.retry_delay`, and the busy timeout
/// bounds how long a single attempt can block on a locked database.
pub fn connect(cfg: &StoreConfig) -> Result<StoreHandle, FatalError> {
    cfg.validate()?;

    let tuning = &cfg.tuning;
    let mut last_error = String::new();

    info!("Connecting to store at {}", cfg.db_path.display());
    for attempt in 1..=tuning.max_retries {
        match open_and_ping(cfg, tuning.attempt_timeout) {
            Ok(conn) => {
                debug!("Store reachable on attempt {}", attempt);
                ensure_schema(&conn).map_err(FatalError::Schema)?;
                return Ok(StoreHandle {
                    conn: Arc::new(Mutex::new(conn)),
                });
            }
            Err(err) => {
                last_error = err.to_string();
                if attempt < tuning.max_retries {
                    warn!(
                        "Store connection failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempt, tuning.max_retries, last_error, tuning.retry_delay
                    );
                    std::thread::sleep(tuning.retry_delay);
                }
            }
        }
    }

    Err(FatalError::Connection {
        attempts: tuning.max_retries,
        last_error,
    })
}

/// One bootstrap attempt: open the database and verify it answers a trivial
/// query. A connection that fails verification is closed here, not leaked to
/// the retry loop.
fn open_and_ping(cfg: &StoreConfig, attempt_timeout: Duration) -> rusqlite::Result<Connection> {
    let conn = Connection::open(&cfg.db_path)?;
    conn.busy_timeout(attempt_timeout)?;
    match conn.query_row("SELECT 1", [], |_| Ok(())) {
        Ok(()) => Ok(conn),
        Err(err) => {
            if let Err((conn, close_err)) = conn.close() {
                warn!("Failed to release unverified connection: {}", close_err);
                drop(conn);
            }
            Err(err)
        }
    }
}

/// Create the images table and its unique filename index if absent. Runs on
/// every successful connect; both statements are idempotent.
fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.execute(UNIQUE_INDEX_SQL, [])?;
    debug!("Images schema and filename uniqueness ensured");
    Ok(())
}

/// Release the store. Safe to call with `None` and safe to call when other
/// clones of the handle are still alive (the connection then closes when the
/// last clone drops).
pub fn close(handle: Option<StoreHandle>) {
    let Some(handle) = handle else {
        return;
    };
    match Arc::try_unwrap(handle.conn) {
        Ok(mutex) => {
            let conn = mutex.into_inner().unwrap_or_else(|p| p.into_inner());
            if let Err((_, err)) = conn.close() {
                warn!("Error closing store connection: {}", err);
            } else {
                debug!("Store connection closed");
            }
        }
        Err(_) => debug!("Store handle still shared; deferring close to last owner"),
    }
}
