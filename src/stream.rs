//! Streaming batch API: emit per-document results as they complete.
//!
//! ## Why stream?
//!
//! A corpus run over thousands of scans takes a while. A streams-based API
//! lets callers log each document the moment it finishes, update a progress
//! display, or abort early, instead of waiting for
//! [`crate::convert::clean_batch`] to return the whole outcome at once.
//!
//! Documents are emitted in completion order, not input order (concurrent
//! workers finish when they finish); sort by `report.input` if order
//! matters.

use crate::config::CleanConfig;
use crate::convert::clean_to_file;
use crate::error::CleanError;
use crate::output::FileReport;
use crate::paratext::doc_label;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio_stream::Stream;
use tracing::info;

/// A boxed stream of per-document reports.
pub type FileReportStream = Pin<Box<dyn Stream<Item = FileReport> + Send>>;

/// Clean many documents concurrently, streaming a [`FileReport`] for each
/// as it completes. Output files are named `<label>.txt` under `out_dir`.
///
/// Fatal setup work (creating `out_dir`) happens before the stream is
/// returned; per-document failures travel inside their reports.
pub async fn clean_stream(
    inputs: Vec<PathBuf>,
    out_dir: &Path,
    config: &CleanConfig,
) -> Result<FileReportStream, CleanError> {
    info!("streaming batch of {} documents", inputs.len());

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: out_dir.to_path_buf(),
            source: e,
        })?;

    let total = inputs.len();
    let concurrency = config.concurrency;
    let out_dir = out_dir.to_path_buf();
    let config = config.clone();

    let s = stream::iter(inputs.into_iter().map(move |input| {
        let config = config.clone();
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
            FileReport {
                input,
                output,
                outcome,
            }
        }
    }))
    .buffer_unordered(concurrency);

    Ok(Box::pin(s))
}
