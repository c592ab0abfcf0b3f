//! Write backends: atomic upsert (canonical) and plain insert (degraded).

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};

use crate::error::WriteError;
use crate::types::{NewImage, StoredImage, WriteOutcome};

use super::{ImageStore, StoreHandle, INSERT_IMAGE_SQL, UPSERT_IMAGE_SQL};

/// Wall clock in nanoseconds since epoch, the timestamp unit for
/// `created_at`/`updated_at`.
fn now_ns() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}

/// Canonical backend: one atomic insert-or-update per write. Two concurrent
/// writers on the same filename cannot both insert; the store resolves the
/// race inside a single statement.
pub struct UpsertStore {
    handle: StoreHandle,
}

impl UpsertStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }
}

impl ImageStore for UpsertStore {
    fn write(&self, image: &NewImage) -> Result<WriteOutcome, WriteError> {
        let now = now_ns();
        let conn = self.handle.lock();
        let created_at: i64 = conn.query_row(
            UPSERT_IMAGE_SQL,
            params![
                image.filename,
                image.size as i64,
                image.content_type,
                image.source_path,
                now
            ],
            |row| row.get(0),
        )?;
        // The conflict branch leaves created_at alone, so it only equals this
        // write's timestamp when the row was just inserted.
        if created_at == now {
            Ok(WriteOutcome::Created)
        } else {
            Ok(WriteOutcome::Updated)
        }
    }
}

/// Degraded backend for stores without a usable upsert primitive: plain
/// insert, with the uniqueness violation translated to
/// [`WriteOutcome::Duplicate`] so callers see the same outcome surface as the
/// canonical backend.
pub struct InsertOnlyStore {
    handle: StoreHandle,
}

impl InsertOnlyStore {
    pub fn new(handle: StoreHandle) -> Self {
        Self { handle }
    }
}

impl ImageStore for InsertOnlyStore {
    fn write(&self, image: &NewImage) -> Result<WriteOutcome, WriteError> {
        let now = now_ns();
        let conn = self.handle.lock();
        match conn.execute(
            INSERT_IMAGE_SQL,
            params![
                image.filename,
                image.size as i64,
                image.content_type,
                image.source_path,
                now
            ],
        ) {
            Ok(_) => Ok(WriteOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(WriteOutcome::Duplicate),
            Err(err) => Err(WriteError(err)),
        }
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    err.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation)
}

/// Number of rows in the images table.
pub fn count_images(handle: &StoreHandle) -> rusqlite::Result<u64> {
    let conn = handle.lock();
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM images", [], |row| row.get(0))?;
    Ok(count.max(0) as u64)
}

/// Fetch one row by filename, or None.
pub fn get_image(handle: &StoreHandle, filename: &str) -> rusqlite::Result<Option<StoredImage>> {
    let conn = handle.lock();
    conn.query_row(
        "SELECT filename, size, content_type, source_path, created_at, updated_at
         FROM images WHERE filename = ?1",
        [filename],
        |row| {
            Ok(StoredImage {
                filename: row.get(0)?,
                size: row.get::<_, i64>(1)?.max(0) as u64,
                content_type: row.get(2)?,
                source_path: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        },
    )
    .optional()
}
