//! Eager (full-document) conversion entry points.
//!
//! ## Per-document sequence
//!
//! Load → front/back-matter excision (only when the line-range table holds
//! this document's label) → boilerplate stripping (only when the marker
//! phrase appears in the opening text and a stripper is configured) → the
//! fixed [`crate::pipeline::clean`] pass → write.
//!
//! Every step either succeeds or fails the document outright; there are no
//! retries and no partial output. [`clean_to_file`] writes through a
//! temporary sibling and renames, so the output path never holds a
//! half-written file. Use [`crate::stream::clean_stream`] when you want
//! per-document results as they complete instead of waiting for a whole
//! batch.

use crate::config::CleanConfig;
use crate::error::CleanError;
use crate::output::{BatchOutcome, CleanOutput, CleanStats, FileReport};
use crate::paratext::doc_label;
use crate::pipeline::{self, boilerplate, load, strip};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Clean a single document and return the result in memory.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Any [`CleanError`]: unreadable or non-UTF-8 input, an out-of-bounds
/// line-range record, or a failed side-file write. All are fatal for the
/// document; nothing is retried.
pub async fn clean_file(
    input: impl AsRef<Path>,
    config: &CleanConfig,
) -> Result<CleanOutput, CleanError> {
    let total_start = Instant::now();
    let input = input.as_ref();
    let label = doc_label(input);
    info!("cleaning {}", input.display());

    // ── Step 1: load (strict UTF-8, NFC) ─────────────────────────────────
    let mut text = load::read_text(input).await?;
    let chars_in = text.chars().count();

    // ── Step 2: front/back matter ────────────────────────────────────────
    let mut front_lines = 0;
    let mut back_lines = 0;
    let mut paratext_applied = false;
    if let Some(range) = config.paratext.as_ref().and_then(|t| t.get(&label)) {
        let stripped = strip::strip_paratext(input, &text, range, config).await?;
        front_lines = stripped.front_lines;
        back_lines = stripped.back_lines;
        text = stripped.core;
        paratext_applied = true;
    }

    // ── Step 3: publisher boilerplate ────────────────────────────────────
    let mut boilerplate_stripped = false;
    if boilerplate::has_marker(&text) {
        match config.boilerplate_stripper {
            Some(ref stripper) => {
                let stripped = stripper.strip(text.as_bytes());
                text = String::from_utf8(stripped).map_err(|e| {
                    CleanError::Internal(format!(
                        "boilerplate stripper returned invalid UTF-8: {e}"
                    ))
                })?;
                boilerplate_stripped = true;
                debug!("{label}: boilerplate stripped");
            }
            None => warn!("{label}: boilerplate marker present but no stripper configured"),
        }
    }

    // ── Step 4: the fixed cleaning pipeline ──────────────────────────────
    // CPU-bound over the whole document; keep it off the async hot path so
    // batch workers stay responsive.
    let cleaned = tokio::task::spawn_blocking(move || pipeline::clean(&text))
        .await
        .map_err(|e| CleanError::Internal(format!("clean task failed: {e}")))?;

    let stats = CleanStats {
        chars_in,
        chars_out: cleaned.chars().count(),
        paragraphs: cleaned.lines().count(),
        front_lines,
        back_lines,
        paratext_applied,
        boilerplate_stripped,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "{label}: {} paragraphs, {} -> {} chars, {}ms",
        stats.paragraphs, stats.chars_in, stats.chars_out, stats.total_duration_ms
    );

    Ok(CleanOutput {
        label,
        text: cleaned,
        stats,
    })
}

/// Clean a document and write the result to `output_path`.
///
/// Uses an atomic write (temp sibling + rename): the output file only
/// exists once the full pipeline has succeeded. The written file is
/// newline-terminated.
pub async fn clean_to_file(
    input: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CleanConfig,
) -> Result<CleanStats, CleanError> {
    let output = clean_file(input, config).await?;
    let path = output_path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CleanError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let mut contents = output.text;
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output".into());
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(output.stats)
}

/// Synchronous wrapper around [`clean_file`].
///
/// Creates a temporary tokio runtime internally.
pub fn clean_sync(
    input: impl AsRef<Path>,
    config: &CleanConfig,
) -> Result<CleanOutput, CleanError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CleanError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(clean_file(input, config))
}

/// Clean many documents concurrently, writing each to `out_dir`.
///
/// Documents are fully independent (the only shared input, the line-range
/// table, is read-only), so up to `config.concurrency` are processed at
/// once. A failed document is captured in its [`FileReport`] and the rest
/// proceed; only a run where *every* document fails returns an error.
///
/// Output files are named `<label>.txt` under `out_dir`.
pub async fn clean_batch(
    inputs: &[PathBuf],
    out_dir: &Path,
    config: &CleanConfig,
) -> Result<BatchOutcome, CleanError> {
    let total_start = Instant::now();
    let total = inputs.len();

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    let mut indexed: Vec<(usize, FileReport)> =
        stream::iter(inputs.iter().enumerate().map(|(idx, input)| {
            let config = config.clone();
            let input = input.clone();
            let output = out_dir.join(format!("{}.txt", doc_label(&input)));
            async move {
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_start(&input, total);
                }
                let outcome = clean_to_file(&input, &output, &config).await;
                if let Some(ref cb) = config.progress_callback {
                    match &outcome {
                        Ok(stats) => cb.on_file_complete(&input, total, stats.paragraphs),
                        Err(e) => cb.on_file_error(&input, total, &e.to_string()),
                    }
                }
                (idx, FileReport { input, output, outcome })
            }
        }))
        .buffer_unordered(config.concurrency)
        .collect()
        .await;

    // Completion order is arbitrary under buffer_unordered.
    indexed.sort_by_key(|&(idx, _)| idx);
    let reports: Vec<FileReport> = indexed.into_iter().map(|(_, r)| r).collect();

    let succeeded = reports.iter().filter(|r| r.outcome.is_ok()).count();
    let failed = total - succeeded;

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total, succeeded);
    }

    if succeeded == 0 && total > 0 {
        let first_error = reports
            .iter()
            .find_map(|r| r.outcome.as_ref().err())
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(CleanError::AllFilesFailed { total, first_error });
    }

    info!("batch complete: {succeeded}/{total} documents");

    Ok(BatchOutcome {
        reports,
        succeeded,
        failed,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    })
}
