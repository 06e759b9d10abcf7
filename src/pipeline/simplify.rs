//! Punctuation/space simplification: the long tail of Unicode space, hyphen,
//! dash, quote, and ellipsis variants collapsed onto a small ASCII set.
//!
//! This deliberately discards information (left vs. right quotes, em dash
//! vs. en dash vs. hyphen): such distinctions are not consistently encoded
//! across languages, sources, and OCR engines, so normalising to a common
//! denominator is more reliable than trying to preserve them.
//!
//! ## Rule Order
//!
//! The rules must run in this specific order. The soft-hyphen-at-line-break
//! rule must fire before the blanket invisible-character deletion (rule 2's
//! two halves), and no rule re-matches the ASCII `-`/`'`/`"` output of an
//! earlier one, which is what makes the whole pass idempotent.
//!
//! Not handled (no occurrences in practice): U+0085 NEL, U+2028 LINE
//! SEPARATOR, U+2029 PARAGRAPH SEPARATOR.

use once_cell::sync::Lazy;
use regex::Regex;

/// Apply all simplification rules to `text`, in order:
/// 1. No-break/typographic space variants → plain space
/// 2. Soft hyphen before a line break → literal hyphen; then delete all
///    remaining invisible formatting characters
/// 3. Hyphen-like marks → `-`
/// 4. Dash-like marks and bullets → `" - "`
/// 5. Fraction/division slashes → `/`
/// 6. Single-quote-like marks → `'`
/// 7. Double-quote-like marks (and doubled apostrophes) → `"`
/// 8. Ellipsis → `...`
pub fn simplify_punctuation(text: &str) -> String {
    let s = normalise_spaces(text);
    let s = hyphenate_soft_hyphens(&s);
    let s = remove_invisible_chars(&s);
    let s = normalise_hyphens(&s);
    let s = normalise_dashes(&s);
    let s = normalise_slashes(&s);
    let s = normalise_single_quotes(&s);
    let s = normalise_double_quotes(&s);
    normalise_ellipsis(&s)
}

// ── Rule 1: space variants ───────────────────────────────────────────────────
//
// U+00A0 NO-BREAK SPACE, U+2000–U+200A the EN QUAD…HAIR SPACE block,
// U+202F NARROW NO-BREAK SPACE.

static RE_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{00A0}\u{2000}-\u{200A}\u{202F}]").unwrap());

fn normalise_spaces(input: &str) -> String {
    RE_SPACES.replace_all(input, " ").to_string()
}

// ── Rule 2a: soft hyphen at end of line ──────────────────────────────────────
//
// A discretionary hyphen immediately before a line break marks a word broken
// across lines; it becomes a real hyphen so dehyphenation tooling can find
// it. Must run before rule 2b deletes the remaining soft hyphens outright.

static RE_SOFT_HYPHEN_EOL: Lazy<Regex> = Lazy::new(|| Regex::new("\u{00AD}+\n").unwrap());

fn hyphenate_soft_hyphens(input: &str) -> String {
    RE_SOFT_HYPHEN_EOL.replace_all(input, "-\n").to_string()
}

// ── Rule 2b: invisible formatting characters ─────────────────────────────────
//
// U+0008 BACKSPACE, U+00AD SOFT HYPHEN, U+200B ZERO WIDTH SPACE,
// U+2027 HYPHENATION POINT.

static RE_INVISIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{0008}\u{00AD}\u{200B}\u{2027}]").unwrap());

fn remove_invisible_chars(input: &str) -> String {
    RE_INVISIBLE.replace_all(input, "").to_string()
}

// ── Rule 3: hyphen-like marks ────────────────────────────────────────────────
//
// U+00B7 MIDDLE DOT, U+2010 HYPHEN, U+2011 NON-BREAKING HYPHEN,
// U+2212 MINUS SIGN.

static RE_HYPHENS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{00B7}\u{2010}\u{2011}\u{2212}]").unwrap());

fn normalise_hyphens(input: &str) -> String {
    RE_HYPHENS.replace_all(input, "-").to_string()
}

// ── Rule 4: dash-like marks and bullets ──────────────────────────────────────
//
// U+2012 FIGURE DASH through U+2015 HORIZONTAL BAR, U+2022 BULLET,
// U+2043 HYPHEN BULLET. Dashes are set off with spaces so they can never be
// mistaken for intra-word hyphens downstream.

static RE_DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{2012}-\u{2015}\u{2022}\u{2043}]").unwrap());

fn normalise_dashes(input: &str) -> String {
    RE_DASHES.replace_all(input, " - ").to_string()
}

// ── Rule 5: fraction/division slashes ────────────────────────────────────────
//
// U+2044 FRACTION SLASH, U+2215 DIVISION SLASH, e.g. 'he⁄she'.

static RE_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{2044}\u{2215}]").unwrap());

fn normalise_slashes(input: &str) -> String {
    RE_SLASHES.replace_all(input, "/").to_string()
}

// ── Rule 6: single quotes ────────────────────────────────────────────────────
//
// U+2018–U+201B the single quotation mark block, U+2039/U+203A single angle
// quotation marks, U+02BC MODIFIER LETTER APOSTROPHE.

static RE_SINGLE_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{2018}-\u{201B}\u{2039}\u{203A}\u{02BC}]").unwrap());

fn normalise_single_quotes(input: &str) -> String {
    RE_SINGLE_QUOTES.replace_all(input, "'").to_string()
}

// ── Rule 7: double quotes ────────────────────────────────────────────────────
//
// U+201C–U+201F the double quotation mark block, U+00AB/U+00BB guillemets,
// plus a doubled typewriter apostrophe ''.

static RE_DOUBLE_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new("[\u{201C}-\u{201F}\u{00AB}\u{00BB}]|''").unwrap());

fn normalise_double_quotes(input: &str) -> String {
    RE_DOUBLE_QUOTES.replace_all(input, "\"").to_string()
}

// ── Rule 8: ellipsis ─────────────────────────────────────────────────────────

fn normalise_ellipsis(input: &str) -> String {
    input.replace('\u{2026}', "...")
}

// ── Tests ────────────────────────────────────────────────────────────────────
