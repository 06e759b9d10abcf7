//! Loader: strict UTF-8 decode plus canonical composition.
//!
//! Digitised corpora arrive from many OCR engines and transcription tools,
//! some of which emit decomposed accents (`e` + combining acute) and some
//! composed ones (`é`). Everything downstream (the ligature table, the
//! punctuation rules, the line-range offsets) assumes one canonical form,
//! so the text is NFC-composed here, once, before any other stage sees it.
//!
//! Decoding is strict: an invalid byte sequence is an upstream conversion
//! bug and is surfaced as [`CleanError::InvalidEncoding`] rather than
//! papered over with replacement characters.

use crate::error::CleanError;
use std::path::Path;
use tracing::debug;
use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Read a UTF-8 text file and return its NFC-normalised contents.
pub async fn read_text(path: impl AsRef<Path>) -> Result<String, CleanError> {
    let path = path.as_ref();
    let text = read_text_raw(path).await?;

    // Most corpora are already composed; skip the re-allocation when so.
    if is_nfc(&text) {
        Ok(text)
    } else {
        debug!("{}: composing to NFC", path.display());
        Ok(text.nfc().collect())
    }
}

/// Read a UTF-8 text file without normalising.
///
/// For callers that must observe the file as it is on disk: the non-ASCII
/// audit reports on raw files, and the token-head copy is a byte-faithful
/// passthrough.
pub async fn read_text_raw(path: impl AsRef<Path>) -> Result<String, CleanError> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CleanError::FileNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => CleanError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => CleanError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    String::from_utf8(bytes).map_err(|e| CleanError::InvalidEncoding {
        path: path.to_path_buf(),
        detail: e.utf8_error().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_bytes(bytes: &[u8]) -> Result<String, CleanError> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        tokio::fs::write(&path, bytes).await.unwrap();
        read_text(&path).await
    }

    #[tokio::test]
    async fn decomposed_accents_are_composed() {
        // 'e' + COMBINING ACUTE ACCENT composes to U+00E9
        let text = read_bytes("caf\u{0065}\u{0301}".as_bytes()).await.unwrap();
        assert_eq!(text, "caf\u{00E9}");
    }

    #[tokio::test]
    async fn composed_text_is_unchanged() {
        let text = read_bytes("caf\u{00E9}\n".as_bytes()).await.unwrap();
        assert_eq!(text, "caf\u{00E9}\n");
    }

    #[tokio::test]
    async fn invalid_utf8_is_a_decoding_error() {
        let err = read_bytes(&[0x66, 0x6f, 0xff, 0x6f]).await.unwrap_err();
        assert!(matches!(err, CleanError::InvalidEncoding { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_such() {
        let err = read_text(Path::new("/nonexistent/novel042.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, CleanError::FileNotFound { .. }));
    }
}
