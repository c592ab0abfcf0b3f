//! Store tests: connect bootstrap, upsert idempotence, duplicate translation.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use imgstash::error::FatalError;
use imgstash::store::{
    close, connect, count_images, get_image, ImageStore, InsertOnlyStore, StoreConfig,
    StoreHandle, UpsertStore,
};
use imgstash::types::{NewImage, WriteOutcome};
use imgstash::utils::config::ConnectTuning;

fn new_image(filename: &str, size: u64) -> NewImage {
    NewImage {
        filename: filename.to_string(),
        size,
        content_type: "image/png".to_string(),
        source_path: format!("/images/upload/{filename}"),
    }
}

// --- connect bootstrap ---

#[test]
fn test_connect_empty_path_is_config_error() {
    let cfg = StoreConfig::new(PathBuf::new());
    assert!(matches!(connect(&cfg), Err(FatalError::Config(_))));
}

#[test]
fn test_connect_first_attempt_succeeds_without_retry_delay() {
    let tmp = tempfile::tempdir().unwrap();
    let mut cfg = StoreConfig::new(tmp.path().join("meta.db"));
    cfg.tuning = ConnectTuning {
        max_retries: 5,
        retry_delay: Duration::from_secs(2),
        attempt_timeout: Duration::from_secs(1),
    };

    let started = Instant::now();
    let handle = connect(&cfg).unwrap();
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "a reachable store must connect on the first attempt, with no retry sleep"
    );

    // Schema was ensured: a write goes straight through.
    let store = UpsertStore::new(handle.clone());
    assert_eq!(store.write(&new_image("a.png", 3)).unwrap(), WriteOutcome::Created);
    close(Some(handle));
}

#[test]
fn test_connect_exhausts_retries_against_unreachable_store() {
    let cfg = StoreConfig {
        db_path: PathBuf::from("/nonexistent-imgstash-dir/meta.db"),
        tuning: ConnectTuning {
            max_retries: 2,
            retry_delay: Duration::from_millis(10),
            attempt_timeout: Duration::from_millis(100),
        },
    };
    match connect(&cfg) {
        Err(FatalError::Connection { attempts, .. }) => assert_eq!(attempts, 2),
        other => panic!("expected Connection error, got {:?}", other.is_ok()),
    }
}

#[test]
fn test_connect_is_repeatable_on_existing_db() {
    // Second bootstrap against the same file re-ensures the schema and
    // leaves existing rows alone.
    let tmp = tempfile::tempdir().unwrap();
    let cfg = StoreConfig::new(tmp.path().join("meta.db"));

    let first = connect(&cfg).unwrap();
    UpsertStore::new(first.clone())
        .write(&new_image("keep.png", 1))
        .unwrap();
    close(Some(first));

    let second = connect(&cfg).unwrap();
    assert_eq!(count_images(&second).unwrap(), 1);
    close(Some(second));
}

#[test]
fn test_close_is_none_safe_and_idempotent() {
    close(None);
    let handle = StoreHandle::in_memory().unwrap();
    let clone = handle.clone();
    close(Some(handle)); // deferred: clone still alive
    close(Some(clone)); // actually closes
}

// --- upsert backend ---

#[test]
fn test_upsert_insert_then_update_keeps_created_at() {
    let handle = StoreHandle::in_memory().unwrap();
    let store = UpsertStore::new(handle.clone());

    assert_eq!(store.write(&new_image("a.png", 10)).unwrap(), WriteOutcome::Created);
    let first = get_image(&handle, "a.png").unwrap().unwrap();
    assert_eq!(first.size, 10);
    assert_eq!(first.created_at, first.updated_at);

    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(store.write(&new_image("a.png", 20)).unwrap(), WriteOutcome::Updated);

    let second = get_image(&handle, "a.png").unwrap().unwrap();
    assert_eq!(count_images(&handle).unwrap(), 1, "re-ingest must not duplicate");
    assert_eq!(second.size, 20);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
}

#[test]
fn test_upsert_distinct_filenames_are_independent() {
    let handle = StoreHandle::in_memory().unwrap();
    let store = UpsertStore::new(handle.clone());

    for name in ["a.png", "b.png", "c.png"] {
        assert_eq!(store.write(&new_image(name, 1)).unwrap(), WriteOutcome::Created);
    }
    assert_eq!(count_images(&handle).unwrap(), 3);
    assert_eq!(
        get_image(&handle, "b.png").unwrap().unwrap().source_path,
        "/images/upload/b.png"
    );
}

// --- insert-only backend ---

#[test]
fn test_insert_only_translates_uniqueness_violation() {
    let handle = StoreHandle::in_memory().unwrap();
    let store = InsertOnlyStore::new(handle.clone());

    assert_eq!(store.write(&new_image("a.png", 10)).unwrap(), WriteOutcome::Created);
    assert_eq!(
        store.write(&new_image("a.png", 20)).unwrap(),
        WriteOutcome::Duplicate,
        "duplicate insert must come back as an outcome, not a raw store error"
    );

    // First write wins; the duplicate changed nothing.
    let row = get_image(&handle, "a.png").unwrap().unwrap();
    assert_eq!(row.size, 10);
    assert_eq!(count_images(&handle).unwrap(), 1);
}

#[test]
fn test_insert_only_distinct_filenames_all_land() {
    let handle = StoreHandle::in_memory().unwrap();
    let store = InsertOnlyStore::new(handle.clone());
    assert_eq!(store.write(&new_image("a.png", 1)).unwrap(), WriteOutcome::Created);
    assert_eq!(store.write(&new_image("b.png", 2)).unwrap(), WriteOutcome::Created);
    assert_eq!(count_images(&handle).unwrap(), 2);
}

#[test]
fn test_get_image_missing_is_none() {
    let handle = StoreHandle::in_memory().unwrap();
    assert!(get_image(&handle, "nope.png").unwrap().is_none());
}
