//! The line-range table: which lines of each document are core text.
//!
//! Front and back matter (title pages, tables of contents, transcriber
//! notes) are identified manually or semi-automatically and recorded in a
//! CSV table with columns `Label`, `start`, `end`: the label is the input
//! file's stem, the line numbers are 1-based and inclusive. The table is
//! loaded and validated once per run, before any document is processed, and
//! is read-only afterwards.
//!
//! Strictness is deliberately asymmetric: a document with no table entry is
//! silently cleaned without excision (the normal path for most of a corpus),
//! but a malformed table aborts the whole run, since a typo in the table
//! would otherwise corrupt documents quietly.

use crate::error::CleanError;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A 1-based, inclusive span of core-text lines within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// Mapping from document label to its core-text [`LineRange`].
#[derive(Debug, Clone, Default)]
pub struct ParatextTable {
    ranges: HashMap<String, LineRange>,
}

/// One CSV row. `start`/`end` come in as raw strings so that "3.5", "-1"
/// and "" can be told apart and reported precisely.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Label")]
    label: String,
    start: Option<String>,
    end: Option<String>,
}

impl ParatextTable {
    /// Load and validate a line-range table from a CSV file.
    ///
    /// Rows with a missing `start` are ignored (no correction available for
    /// that document). Any of the following aborts the load, and with it the
    /// run:
    /// - duplicate labels among the remaining rows
    /// - `start` or `end` not a positive integer
    /// - `start` greater than `end`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CleanError> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| CleanError::TableRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut ranges = HashMap::new();
        for row in reader.deserialize::<Row>() {
            let row = row.map_err(|e| CleanError::TableRead {
                path: path.to_path_buf(),
                source: e,
            })?;

            let start = match row.start.as_deref().map(str::trim) {
                None | Some("") => continue,
                Some(s) => parse_lineno(&row.label, "start", s)?,
            };
            let end = match row.end.as_deref().map(str::trim) {
                None | Some("") => {
                    return Err(CleanError::BadLineNumber {
                        label: row.label,
                        column: "end",
                        value: String::new(),
                    })
                }
                Some(s) => parse_lineno(&row.label, "end", s)?,
            };
            if start > end {
                return Err(CleanError::InvalidRange {
                    label: row.label,
                    start,
                    end,
                });
            }

            if ranges.insert(row.label.clone(), LineRange { start, end }).is_some() {
                return Err(CleanError::DuplicateLabel {
                    label: row.label,
                    path: path.to_path_buf(),
                });
            }
        }

        debug!("loaded {} line-range records from {}", ranges.len(), path.display());
        Ok(Self { ranges })
    }

    /// Look up the core-text range for a document label.
    pub fn get(&self, label: &str) -> Option<LineRange> {
        self.ranges.get(label).copied()
    }

    /// Insert a record programmatically (tests, embedding callers).
    pub fn insert(&mut self, label: impl Into<String>, range: LineRange) {
        self.ranges.insert(label.into(), range);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn parse_lineno(label: &str, column: &'static str, value: &str) -> Result<usize, CleanError> {
    match value.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n as usize),
        _ => Err(CleanError::BadLineNumber {
            label: label.to_string(),
            column,
            value: value.to_string(),
        }),
    }
}

/// Derive the table label for an input path: the file name without its
/// extension.
pub fn doc_label(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Write an uncorrected seed table covering each input in full
/// (`start = 1`, `end = line count`), ready for manual correction.
///
/// Returns the number of rows written.
pub async fn write_seed_table(
    inputs: &[PathBuf],
    out: &Path,
) -> Result<usize, CleanError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Label", "start", "end"])
        .map_err(|e| CleanError::Internal(format!("csv: {e}")))?;

    for input in inputs {
        let text = crate::pipeline::load::read_text(input).await?;
        let lines = text.split_inclusive('\n').count().to_string();
        writer
            .write_record([doc_label(input).as_str(), "1", lines.as_str()])
            .map_err(|e| CleanError::Internal(format!("csv: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CleanError::Internal(format!("csv: {e}")))?;
    tokio::fs::write(out, bytes)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: out.to_path_buf(),
            source: e,
        })?;
    Ok(inputs.len())
}
