//! Publisher-boilerplate detection and the pluggable stripper seam.
//!
//! Public-domain etexts carry licence headers and footers around the actual
//! work. Whether and how to remove them is a policy question that does not
//! belong in the core pipeline, so the pipeline only *detects* a marked
//! document (a fixed marker phrase in its opening text) and hands the whole
//! text to an injectable [`BoilerplateStripper`]. Swapping the stripper, or
//! stubbing it in tests, never touches the cleaning stages.

use once_cell::sync::Lazy;
use regex::Regex;

/// How far into the document the marker phrase is searched for.
const MARKER_WINDOW_CHARS: usize = 1000;

static RE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new("(?i)project gutenberg").unwrap());

/// True when the document's opening text carries the boilerplate marker.
///
/// Only the first 1000 characters are inspected: the phrase appears in the
/// header of marked documents, and scanning further would false-positive on
/// works that merely mention the publisher.
pub fn has_marker(text: &str) -> bool {
    let end = text
        .char_indices()
        .nth(MARKER_WINDOW_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    RE_MARKER.is_match(&text[..end])
}

/// Removes publisher front/back boilerplate from a document.
///
/// The contract is deliberately narrow (UTF-8 bytes in, UTF-8 bytes out),
/// so implementations can shell out, call a library, or be a test stub
/// returning a fixed payload. Invoked by the orchestrator only when
/// [`has_marker`] fires and a stripper is configured.
pub trait BoilerplateStripper: Send + Sync {
    fn strip(&self, raw: &[u8]) -> Vec<u8>;
}

/// Built-in stripper for Project Gutenberg etexts.
///
/// Drops everything up to and including the `*** START OF …` marker line and
/// everything from the `*** END OF …` marker line onwards. A missing marker
/// leaves that side of the text untouched, so partially marked files degrade
/// to a no-op rather than losing content.
pub struct GutenbergStripper;

static RE_START_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\*\*\* ?start of [^\n]*\n?").unwrap());
static RE_END_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mi)^\*\*\* ?end of [^\n]*").unwrap());

impl BoilerplateStripper for GutenbergStripper {
    fn strip(&self, raw: &[u8]) -> Vec<u8> {
        let text = String::from_utf8_lossy(raw);
        let start = RE_START_MARKER.find(&text).map(|m| m.end()).unwrap_or(0);
        let end = RE_END_MARKER
            .find_at(&text, start)
            .map(|m| m.start())
            .unwrap_or(text.len());
        text[start..end].as_bytes().to_vec()
    }
}
