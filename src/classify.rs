//! Content-type sniffing from leading file bytes.
//!
//! Classification looks at the bytes, never the filename, so a text file
//! renamed to `photo.jpg` still comes back as `text/plain`. Magic-byte
//! matching is done by the `infer` crate; anything it does not recognize
//! falls back to `text/plain` for valid UTF-8 and `application/octet-stream`
//! otherwise.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::utils::config::SNIFF_LEN;

/// Sniff the base content type of the file at `path`.
///
/// Reads at most the first [`SNIFF_LEN`] bytes; a file shorter than that is
/// classified from whatever is there. Only a genuine I/O error fails the call.
/// The result never carries a `;charset=...` parameter segment.
pub fn classify(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut buf)?;
    Ok(sniff(&buf))
}

/// Classify a byte buffer. Split out from [`classify`] so tests can feed
/// signatures directly.
pub fn sniff(buf: &[u8]) -> String {
    let detected = match infer::get(buf) {
        Some(kind) => kind.mime_type().to_string(),
        None if std::str::from_utf8(buf).is_ok() => "text/plain".to_string(),
        None => "application/octet-stream".to_string(),
    };
    base_type(&detected)
}

/// Strip any parameter segment (`; charset=utf-8` and the like).
fn base_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_string()
}
