//! # ocr2para
//!
//! Normalise messy OCR'd and digitised text into canonical, one-paragraph-
//! per-line UTF-8 plain text, ready for downstream linguistic tooling.
//!
//! ## Why this crate?
//!
//! Digitised corpora are a mess of encodings-within-an-encoding: typographic
//! ligature codepoints, a dozen kinds of space, four kinds of dash, curly
//! quotes in three scripts, soft hyphens, legacy line endings, transcriber
//! separator lines and publisher boilerplate. Parsers and taggers want none
//! of that. This crate applies a fixed, ordered sequence of Unicode-aware
//! transformations that collapses the long tail onto a stable ASCII-compatible
//! common denominator. Deliberately lossy, deterministically so.
//!
//! ## Pipeline Overview
//!
//! ```text
//! raw file
//!  │
//!  ├─ 1. Load         strict UTF-8 decode + NFC composition
//!  ├─ 2. Strip        front/back matter excision per the line-range table
//!  ├─ 3. Boilerplate  optional, marker-gated, pluggable stripper
//!  ├─ 4. Ligatures    ﬁ ﬀ ﬂ ﬃ ﬄ Ĳ ĳ Æ æ → ASCII letters
//!  ├─ 5. Simplify     spaces/hyphens/dashes/quotes/ellipsis → ASCII
//!  ├─ 6. Normalise    line endings, separators, whitespace, paragraphs
//!  └─ 7. Write        atomic (temp + rename), newline-terminated
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocr2para::{clean_to_file, CleanConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CleanConfig::default();
//!     let stats = clean_to_file("converted/novel042.txt", "cleaned/novel042.txt", &config).await?;
//!     eprintln!("{} paragraphs, {} -> {} chars",
//!         stats.paragraphs, stats.chars_in, stats.chars_out);
//!     Ok(())
//! }
//! ```
//!
//! The pure transformation is also available directly, without any I/O:
//!
//! ```rust
//! let cleaned = ocr2para::clean("Eerste\u{00A0}alinea…\r\n\r\n\r\nTweede alinea.\r\n");
//! assert_eq!(cleaned, "Eerste alinea...\nTweede alinea.");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ocr2para` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! ocr2para = { version = "0.4", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod audit;
pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod paratext;
pub mod pipeline;
pub mod progress;
pub mod stream;
pub mod tokens;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use audit::{audit_file, AuditReport, CharFrequency};
pub use config::{CleanConfig, CleanConfigBuilder};
pub use convert::{clean_batch, clean_file, clean_sync, clean_to_file};
pub use error::CleanError;
pub use output::{BatchOutcome, CleanOutput, CleanStats, FileReport};
pub use paratext::{doc_label, write_seed_table, LineRange, ParatextTable};
pub use pipeline::boilerplate::{BoilerplateStripper, GutenbergStripper};
pub use pipeline::clean;
pub use progress::{CleanProgressCallback, NoopProgressCallback, ProgressCallback};
pub use stream::{clean_stream, FileReportStream};
pub use tokens::take_tokens;
