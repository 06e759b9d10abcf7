//! Non-ASCII audit: what funky characters does a file contain, and how much
//! of it is already NFC-composed?
//!
//! Run this over a freshly converted corpus before cleaning it; the census
//! tells you whether the fixed ligature and punctuation tables cover what
//! the OCR engine actually produced, and a low NFC ratio points at a
//! conversion step emitting decomposed accents.

use crate::error::CleanError;
use crate::pipeline::load;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use unicode_normalization::is_nfc;

/// One non-ASCII character and how often it occurs in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharFrequency {
    pub character: char,
    /// `U+XXXX` notation, for grepping character references.
    pub codepoint: String,
    pub count: usize,
}

/// The audit result for one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub path: PathBuf,
    pub total_lines: usize,
    /// Lines that are already NFC-normalised as stored on disk.
    pub nfc_lines: usize,
    /// Every non-ASCII character in the file, most frequent first.
    pub non_ascii: Vec<CharFrequency>,
}

impl AuditReport {
    pub fn nfc_percentage(&self) -> f64 {
        if self.total_lines == 0 {
            100.0
        } else {
            100.0 * self.nfc_lines as f64 / self.total_lines as f64
        }
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        writeln!(f, "{name}")?;
        writeln!(
            f,
            "Unicode NFC lines: {} / {} ({:.1} %)",
            self.nfc_lines,
            self.total_lines,
            self.nfc_percentage()
        )?;
        if self.non_ascii.is_empty() {
            writeln!(f, "<none!>")?;
        } else {
            for freq in &self.non_ascii {
                writeln!(
                    f,
                    "{:>10} {:>6}  {}",
                    format!("{:?}", freq.character),
                    freq.count,
                    freq.codepoint
                )?;
            }
        }
        Ok(())
    }
}

/// Audit one file as stored on disk (no normalisation is applied).
pub async fn audit_file(path: impl AsRef<Path>) -> Result<AuditReport, CleanError> {
    let path = path.as_ref();
    let text = load::read_text_raw(path).await?;

    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total_lines = 0;
    let mut nfc_lines = 0;
    for line in text.split_inclusive('\n') {
        total_lines += 1;
        if is_nfc(line) {
            nfc_lines += 1;
        }
        for ch in line.chars().filter(|c| !c.is_ascii()) {
            *counts.entry(ch).or_insert(0) += 1;
        }
    }

    let mut non_ascii: Vec<CharFrequency> = counts
        .into_iter()
        .map(|(character, count)| CharFrequency {
            character,
            codepoint: format!("U+{:04X}", character as u32),
            count,
        })
        .collect();
    non_ascii.sort_by(|a, b| b.count.cmp(&a.count).then(a.character.cmp(&b.character)));

    Ok(AuditReport {
        path: path.to_path_buf(),
        total_lines,
        nfc_lines,
        non_ascii,
    })
}
