//! Result types returned by the conversion entry points.
//!
//! [`CleanStats`] is intentionally serialisable: a corpus run typically logs
//! one JSON line per document, and diffing two runs' stats is the quickest
//! way to spot a regression in the cleaning rules.

use crate::error::CleanError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Statistics for one cleaned document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanStats {
    /// Characters in the decoded input (after NFC, before any stripping).
    pub chars_in: usize,
    /// Characters in the cleaned output.
    pub chars_out: usize,
    /// Output lines; each is exactly one paragraph.
    pub paragraphs: usize,
    /// Lines excised to the front-matter side file (0 when no record applied).
    pub front_lines: usize,
    /// Lines excised to the back-matter side file (0 when no record applied).
    pub back_lines: usize,
    /// Whether a line-range record was found and applied for this document.
    pub paratext_applied: bool,
    /// Whether the boilerplate stripper ran (marker detected and a stripper
    /// was configured).
    pub boilerplate_stripped: bool,
    /// Wall-clock time for the whole document pipeline.
    pub total_duration_ms: u64,
}

/// The outcome of cleaning a single document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOutput {
    /// Document label (input file stem), the key used in the line-range table.
    pub label: String,
    /// The cleaned text: LF-only, one paragraph per line.
    pub text: String,
    pub stats: CleanStats,
}

/// Per-document outcome inside a batch run.
///
/// A failed document never aborts the batch (documents are independent),
/// so the error travels here instead of propagating.
#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    /// Destination the cleaned text was (or would have been) written to.
    pub output: PathBuf,
    pub outcome: Result<CleanStats, CleanError>,
}

/// Summary of a batch run.
#[derive(Debug)]
pub struct BatchOutcome {
    /// One report per input, in input order.
    pub reports: Vec<FileReport>,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
}
