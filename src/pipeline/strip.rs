//! Front/back-matter excision driven by the line-range table.
//!
//! Title pages, publisher notes and indices are not thrown away: they are
//! split off and persisted to side files (a required side effect; the
//! excised paratext is corpus material in its own right), and only the core
//! span continues through the cleaning stages.
//!
//! Lines are split with `split_inclusive('\n')` so every line keeps its
//! terminator. A terminator-stripping split (`str::lines`) would corrupt the
//! reconstructed side files and silently shorten the returned core text.

use crate::config::CleanConfig;
use crate::error::CleanError;
use crate::paratext::{doc_label, LineRange};
use std::path::{Path, PathBuf};
use tracing::debug;

/// The result of excising front and back matter from one document.
#[derive(Debug)]
pub struct StrippedText {
    /// The core span, lines `start..=end`, terminators preserved.
    pub core: String,
    pub front_lines: usize,
    pub back_lines: usize,
    /// Where the front matter was written.
    pub front_path: PathBuf,
    /// Where the back matter was written.
    pub back_path: PathBuf,
}

/// Split `text` into front matter, core text, and back matter according to
/// `range`, write front and back to side files, and return the core.
///
/// The side files land in a sibling directory of the input file's directory
/// (named by `config.paratext_dir_name`), as `<stem>_1_front.txt` and
/// `<stem>_2_back.txt`; the numbered suffixes keep front before back in a
/// directory listing. Directory creation is idempotent and safe under
/// concurrent batch workers.
///
/// # Errors
/// [`CleanError::RangeOutOfBounds`] when `range.end` exceeds the document's
/// line count; [`CleanError::OutputWriteFailed`] when a side file or its
/// directory cannot be created.
pub async fn strip_paratext(
    input: &Path,
    text: &str,
    range: LineRange,
    config: &CleanConfig,
) -> Result<StrippedText, CleanError> {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    if range.start < 1 || range.end > lines.len() {
        return Err(CleanError::RangeOutOfBounds {
            label: doc_label(input),
            start: range.start,
            end: range.end,
            total: lines.len(),
        });
    }

    let front = &lines[..range.start - 1];
    let core = &lines[range.start - 1..range.end];
    let back = &lines[range.end..];

    let (front_path, back_path) = side_file_paths(input, &config.paratext_dir_name);
    if let Some(dir) = front_path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| CleanError::OutputWriteFailed {
                path: dir.to_path_buf(),
                source: e,
            })?;
    }
    tokio::fs::write(&front_path, front.concat())
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: front_path.clone(),
            source: e,
        })?;
    tokio::fs::write(&back_path, back.concat())
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: back_path.clone(),
            source: e,
        })?;

    debug!(
        "{}: kept lines {}-{}, excised {} front and {} back",
        input.display(),
        range.start,
        range.end,
        front.len(),
        back.len()
    );

    Ok(StrippedText {
        core: core.concat(),
        front_lines: front.len(),
        back_lines: back.len(),
        front_path,
        back_path,
    })
}

/// Derive the side-file paths for an input.
///
/// The paratext directory substitutes the last segment of the input's
/// directory, keeping a conversion tree and its paratext tree parallel:
/// `corpus/converted/novel.txt` → `corpus/paratext/novel_{1_front,2_back}.txt`.
fn side_file_paths(input: &Path, dir_name: &str) -> (PathBuf, PathBuf) {
    let stem = doc_label(input);
    let dir = input
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new(""))
        .join(dir_name);
    (
        dir.join(format!("{stem}_1_front.txt")),
        dir.join(format!("{stem}_2_back.txt")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paratext::LineRange;

    fn ten_lines() -> String {
        (1..=10).map(|n| format!("line {n}\n")).collect()
    }

    #[tokio::test]
    async fn partitions_front_core_and_back() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("converted");
        tokio::fs::create_dir_all(&input_dir).await.unwrap();
        let input = input_dir.join("doc.txt");
        let text = ten_lines();
        let config = CleanConfig::default();

        let stripped = strip_paratext(&input, &text, LineRange { start: 3, end: 7 }, &config)
            .await
            .unwrap();

        assert_eq!(
            stripped.core,
            "line 3\nline 4\nline 5\nline 6\nline 7\n"
        );
        assert_eq!(stripped.front_lines, 2);
        assert_eq!(stripped.back_lines, 3);

        let front = tokio::fs::read_to_string(&stripped.front_path).await.unwrap();
        let back = tokio::fs::read_to_string(&stripped.back_path).await.unwrap();
        assert_eq!(front, "line 1\nline 2\n");
        assert_eq!(back, "line 8\nline 9\nline 10\n");
    }

    #[tokio::test]
    async fn side_files_land_in_a_sibling_directory() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("converted");
        tokio::fs::create_dir_all(&input_dir).await.unwrap();
        let input = input_dir.join("doc.txt");
        let config = CleanConfig::default();

        let stripped = strip_paratext(&input, &ten_lines(), LineRange { start: 1, end: 10 }, &config)
            .await
            .unwrap();

        assert_eq!(
            stripped.front_path,
            dir.path().join("paratext").join("doc_1_front.txt")
        );
        assert_eq!(
            stripped.back_path,
            dir.path().join("paratext").join("doc_2_back.txt")
        );
    }

    #[tokio::test]
    async fn whole_document_range_leaves_empty_side_files() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("converted");
        tokio::fs::create_dir_all(&input_dir).await.unwrap();
        let input = input_dir.join("doc.txt");
        let text = ten_lines();
        let config = CleanConfig::default();

        let stripped = strip_paratext(&input, &text, LineRange { start: 1, end: 10 }, &config)
            .await
            .unwrap();

        assert_eq!(stripped.core, text);
        assert_eq!(stripped.front_lines, 0);
        assert_eq!(stripped.back_lines, 0);
        let front = tokio::fs::read_to_string(&stripped.front_path).await.unwrap();
        assert!(front.is_empty());
    }

    #[tokio::test]
    async fn range_past_the_document_is_a_bounds_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.txt");
        let config = CleanConfig::default();

        let err = strip_paratext(&input, &ten_lines(), LineRange { start: 3, end: 11 }, &config)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CleanError::RangeOutOfBounds { start: 3, end: 11, total: 10, .. }
        ));
    }

    #[tokio::test]
    async fn final_line_without_terminator_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("converted");
        tokio::fs::create_dir_all(&input_dir).await.unwrap();
        let input = input_dir.join("doc.txt");
        let config = CleanConfig::default();

        let stripped = strip_paratext(&input, "a\nb\nc", LineRange { start: 2, end: 3 }, &config)
            .await
            .unwrap();

        assert_eq!(stripped.core, "b\nc");
        assert_eq!(stripped.front_lines, 1);
        assert_eq!(stripped.back_lines, 0);
    }
}
