//! Error types for the ocr2para library.
//!
//! Every failure in this pipeline is a permanent precondition violation:
//! a file that is not UTF-8, a malformed line-range table, a range pointing
//! past the end of a document. There is no transient class (no network, no
//! contention), so nothing is ever retried and no partial output is written:
//! the output file only comes into existence after the full pipeline has
//! succeeded for its document.
//!
//! The variants group into four families:
//!
//! * **Decoding** — the input is not valid UTF-8; fatal for that document.
//! * **Validation** — the line-range table is malformed; fatal for the whole
//!   run, raised before any document is touched.
//! * **Bounds** — a line-range record points outside its document; fatal for
//!   that document.
//! * **I/O** — missing input, unreadable file, unwritable output; fatal.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the ocr2para library.
#[derive(Debug, Error)]
pub enum CleanError {
    // ── I/O errors ────────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{}'\nCheck the path exists and is readable.", .path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{}'\nTry: chmod +r {path:?}", .path.display())]
    PermissionDenied { path: PathBuf },

    /// Reading the input failed for a reason other than the above.
    #[error("failed to read '{}': {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write an output file (cleaned text, front/back
    /// matter side files, or the directory holding them).
    #[error("failed to write output file '{}': {source}", .path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Decoding errors ───────────────────────────────────────────────────
    /// The input is not valid UTF-8. Never recovered; re-encode the source.
    #[error("'{}' is not valid UTF-8: {detail}\nConvert the file to UTF-8 first, e.g.: iconv -f latin1 -t utf8", .path.display())]
    InvalidEncoding { path: PathBuf, detail: String },

    // ── Line-range table validation ───────────────────────────────────────
    /// The table file could not be read or parsed as CSV at all.
    #[error("failed to read line-range table '{}': {source}", .path.display())]
    TableRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two rows in the table share a document label.
    #[error("line-range table '{}' has duplicate label '{label}'", .path.display())]
    DuplicateLabel { label: String, path: PathBuf },

    /// A line number is missing, not an integer, or not positive.
    #[error("line-range table row '{label}': column '{column}' has non-integer or non-positive value {value:?}")]
    BadLineNumber {
        label: String,
        column: &'static str,
        value: String,
    },

    /// A record's start line lies after its end line.
    #[error("line-range table row '{label}': start {start} > end {end}")]
    InvalidRange {
        label: String,
        start: usize,
        end: usize,
    },

    // ── Bounds errors ─────────────────────────────────────────────────────
    /// A record's span exceeds the actual line count of its document.
    #[error("line range {start}-{end} for '{label}' is out of bounds (document has {total} lines)")]
    RangeOutOfBounds {
        label: String,
        start: usize,
        end: usize,
        total: usize,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Batch errors ──────────────────────────────────────────────────────
    /// Every document in a batch failed; no output was produced.
    #[error("all {total} documents failed.\nFirst error: {first_error}")]
    AllFilesFailed { total: usize, first_error: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
