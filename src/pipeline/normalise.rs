//! Structural normalisation: line endings, separator lines, whitespace.
//!
//! The last stage of the pipeline. Its output satisfies the final contract:
//! no carriage returns, no separator-only lines, no blank lines, no leading
//! or trailing horizontal whitespace on any line, single spaces between
//! words, and blank-line paragraph breaks reduced to one line feed: one
//! paragraph per output line.
//!
//! ## Rule Order
//!
//! Line endings are fixed first so every later rule can treat `\n` as the
//! only terminator; the break-adjacent whitespace rules must run before the
//! general whitespace collapse, or a stripped line edge would be left with
//! a stray interior space; blank-line collapse runs last, after separator
//! removal has turned separator lines into blank ones' worth of breaks.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all structural rules to `text`, in order:
/// 1. Carriage returns: deleted, unless the document has no line feeds at
///    all (legacy single-CR line endings), in which case each CR becomes LF
/// 2. ASCII dash runs (`--`, `---`, …) → `" - "` (single hyphens untouched)
/// 3. Square brackets → round parentheses
/// 4. Separator-only lines (`=====`, `***`, `* * *`, `~`, `..`) removed
/// 5. Whole-text trim; horizontal whitespace stripped around every line
///    break; remaining space/tab runs collapsed to a single space
/// 6. Runs of two-or-more line breaks collapsed to one
pub fn normalise_structure(text: &str) -> String {
    let s = normalise_line_endings(text);
    let s = collapse_dash_runs(&s);
    let s = swap_brackets(&s);
    let s = remove_separator_lines(&s);
    let s = normalise_whitespace(&s);
    collapse_blank_lines(&s)
}

// ── Rule 1: line endings ─────────────────────────────────────────────────────

fn normalise_line_endings(input: &str) -> String {
    if input.contains('\n') {
        input.replace('\r', "")
    } else {
        // Pre-OS-X Mac convention: CR is the only terminator present.
        input.replace('\r', "\n")
    }
}

// ── Rule 2: ASCII dash runs ──────────────────────────────────────────────────
//
// Typewriter-style em dashes (`--`). Two-or-more only: single hyphens are
// intra-word and must survive.

static RE_DASH_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("--+").unwrap());

fn collapse_dash_runs(input: &str) -> String {
    RE_DASH_RUN.replace_all(input, " - ").to_string()
}

// ── Rule 3: square brackets ──────────────────────────────────────────────────
//
// Downstream parsers reserve square brackets for bracketed input.

fn swap_brackets(input: &str) -> String {
    input.replace('[', "(").replace(']', ")")
}

// ── Rule 4: separator-only lines ─────────────────────────────────────────────
//
// Scene breaks and transcription artefacts: a run of two-or-more `=`, a run
// of `*`, the alternating `* * *` pattern, a single `~`, or a literal `..`,
// optionally surrounded by horizontal whitespace. The whole line disappears,
// terminator included.

static RE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*(==+|\*+|\*( \*)*|~|\.\.)[ \t]*$").unwrap());

fn remove_separator_lines(input: &str) -> String {
    input
        .split_inclusive('\n')
        .filter(|line| !RE_SEPARATOR.is_match(line.trim_end_matches('\n')))
        .collect()
}

// ── Rule 5: horizontal whitespace ────────────────────────────────────────────

static RE_AFTER_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new("\n[ \t]+").unwrap());
static RE_BEFORE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new("[ \t]+\n").unwrap());
static RE_SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("[ \t]+").unwrap());

fn normalise_whitespace(input: &str) -> String {
    let s = input.trim();
    let s = RE_AFTER_BREAK.replace_all(s, "\n");
    let s = RE_BEFORE_BREAK.replace_all(&s, "\n");
    RE_SPACE_RUN.replace_all(&s, " ").to_string()
}

// ── Rule 6: blank lines ──────────────────────────────────────────────────────

static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new("\n\n+").unwrap());

fn collapse_blank_lines(input: &str) -> String {
    RE_BLANK_LINES.replace_all(input, "\n").to_string()
}

// ── Tests ────────────────────────────────────────────────────────────────────
