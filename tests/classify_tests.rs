//! Classifier tests: sniffing is content-based, short files are fine.

use std::fs;

use imgstash::classify::classify;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[test]
fn test_classify_png_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("real.png");
    let mut bytes = PNG_MAGIC.to_vec();
    bytes.resize(1024, 0);
    fs::write(&path, bytes).unwrap();

    assert_eq!(classify(&path).unwrap(), "image/png");
}

#[test]
fn test_classify_ignores_extension() {
    // A text file wearing a .jpg name must still sniff as text.
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("photo.jpg");
    fs::write(&path, "definitely not an image").unwrap();

    assert_eq!(classify(&path).unwrap(), "text/plain");
}

#[test]
fn test_classify_file_shorter_than_sniff_window() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("tiny.png");
    fs::write(&path, PNG_MAGIC).unwrap();

    assert_eq!(classify(&path).unwrap(), "image/png");
}

#[test]
fn test_classify_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("empty");
    fs::write(&path, b"").unwrap();

    assert_eq!(classify(&path).unwrap(), "text/plain");
}

#[test]
fn test_classify_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(classify(&tmp.path().join("gone")).is_err());
}
