//! Metadata store: connection bootstrap, schema, and write backends.
//!
//! Everything above this module talks to the store through the [`ImageStore`]
//! trait, so the two write strategies (atomic upsert vs plain insert with
//! duplicate translation) are interchangeable.

pub mod connect;
pub mod writer;

pub use connect::{close, connect, StoreConfig, StoreHandle};
pub use writer::{count_images, get_image, InsertOnlyStore, UpsertStore};

use crate::error::WriteError;
use crate::types::{NewImage, WriteOutcome};

/// One idempotent create-or-update keyed by filename.
///
/// Implementations must be safe to call from many workers at once; writers
/// targeting distinct filenames never coordinate, and two concurrent writers
/// on the same filename must never both observe an insert.
pub trait ImageStore: Send + Sync {
    fn write(&self, image: &NewImage) -> Result<WriteOutcome, WriteError>;
}

/// Schema for the images table. `filename` is the natural key; the explicit
/// unique index is created separately in the bootstrap so a pre-existing
/// table without it still gets the constraint.
pub(crate) const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS images (
    filename TEXT PRIMARY KEY,
    size INTEGER NOT NULL,
    content_type TEXT NOT NULL,
    source_path TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

/// Unique constraint on the natural key, ensured at every bootstrap.
pub(crate) const UNIQUE_INDEX_SQL: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_images_filename ON images(filename)";

/// Atomic upsert: insert a new row, or refresh the mutable fields of an
/// existing one. `created_at` survives the conflict branch untouched.
/// RETURNING created_at lets the caller tell insert from update.
pub(crate) const UPSERT_IMAGE_SQL: &str = r#"
INSERT INTO images (filename, size, content_type, source_path, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?5)
ON CONFLICT(filename) DO UPDATE SET
    size = excluded.size,
    content_type = excluded.content_type,
    source_path = excluded.source_path,
    updated_at = excluded.updated_at
RETURNING created_at
"#;

/// Plain insert for the degraded backend; duplicates surface as a
/// uniqueness violation and are translated, never propagated.
pub(crate) const INSERT_IMAGE_SQL: &str = r#"
INSERT INTO images (filename, size, content_type, source_path, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?5)
"#;
