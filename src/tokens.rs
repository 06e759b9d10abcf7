//! Token-bounded head copy: the first N tokens of a tokenised file.
//!
//! Corpus experiments often want equally sized samples from each text.
//! Given a file with one sentence per line of space-separated tokens, this
//! copies whole lines until the running token count exceeds the budget.
//! The crossing line is still written, so every output ends on a complete
//! line and carries at least `max_tokens` tokens (when the input has them).

use crate::error::CleanError;
use crate::pipeline::load;
use std::path::Path;
use tracing::debug;

/// Copy lines from `input` to `output` until more than `max_tokens`
/// whitespace-separated tokens have been written. Returns the number of
/// tokens actually written.
pub async fn take_tokens(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    max_tokens: usize,
) -> Result<usize, CleanError> {
    let input = input.as_ref();
    let output = output.as_ref();
    let text = load::read_text_raw(input).await?;

    let mut head = String::new();
    let mut written = 0;
    for line in text.split_inclusive('\n') {
        head.push_str(line);
        written += line.split_whitespace().count();
        if written > max_tokens {
            break;
        }
    }

    tokio::fs::write(output, head)
        .await
        .map_err(|e| CleanError::OutputWriteFailed {
            path: output.to_path_buf(),
            source: e,
        })?;

    debug!(
        "{}: wrote {} tokens (budget {})",
        output.display(),
        written,
        max_tokens
    );
    Ok(written)
}
