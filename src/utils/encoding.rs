//! Text decoding for context files.
//!
//! Context files are expected to be UTF-8, but hand-edited files sometimes
//! arrive with a BOM, as UTF-16, or in a legacy single-byte encoding. Reading
//! goes through a fixed ladder:
//! - BOM markers (UTF-8, UTF-16 LE/BE) decide the encoding outright
//! - strict UTF-8 is the fast path
//! - otherwise `chardetng` guesses and `encoding_rs` decodes with replacement

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::path::Path;

/// Read `path` as text, returning the decoded content.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let (content, encoding) = decode_bytes(&bytes);
    if encoding != UTF_8 {
        tracing::debug!("decoded {} as {}", path.display(), encoding.name());
    }
    Ok(content)
}

/// Decode raw bytes, returning the text and the encoding that was used.
pub fn decode_bytes(bytes: &[u8]) -> (String, &'static Encoding) {
    if let Some(rest) = bytes.strip_prefix(&[0xef, 0xbb, 0xbf]) {
        let (cow, _) = UTF_8.decode_without_bom_handling(rest);
        return (cow.into_owned(), UTF_8);
    }
    if bytes.starts_with(&[0xff, 0xfe]) {
        let (cow, _, _) = UTF_16LE.decode(bytes);
        return (cow.into_owned(), UTF_16LE);
    }
    if bytes.starts_with(&[0xfe, 0xff]) {
        let (cow, _, _) = UTF_16BE.decode(bytes);
        return (cow.into_owned(), UTF_16BE);
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), UTF_8);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (cow, _) = encoding.decode_without_bom_handling(bytes);
    (cow.into_owned(), encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn reads_plain_utf8() {
        let mut file = NamedTempFile::new().expect("tmp");
        file.write_all("Tasks 🚀\n".as_bytes()).expect("write");
        file.flush().expect("flush");

        assert_eq!(read_text(file.path()).expect("read"), "Tasks 🚀\n");
    }

    #[test]
    fn strips_utf8_bom() {
        let (text, enc) = decode_bytes(&[0xef, 0xbb, 0xbf, b'h', b'i']);
        assert_eq!(text, "hi");
        assert_eq!(enc, UTF_8);
    }

    #[test]
    fn decodes_utf16_le_with_bom() {
        let (text, enc) = decode_bytes(&[0xff, 0xfe, b'o', 0, b'k', 0]);
        assert_eq!(text, "ok");
        assert_eq!(enc, UTF_16LE);
    }

    #[test]
    fn falls_back_to_detection_for_latin1() {
        // "café" in windows-1252
        let (text, _) = decode_bytes(&[b'c', b'a', b'f', 0xe9]);
        assert!(text.starts_with("caf"));
        assert_eq!(text.chars().count(), 4);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_text(Path::new("/nonexistent/ctx/TASKS.md")).expect_err("missing");
        assert!(err.to_string().contains("TASKS.md"));
    }
}
