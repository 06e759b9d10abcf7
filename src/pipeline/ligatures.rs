//! Ligature expansion: single-codepoint Latin ligatures to ASCII letters.
//!
//! OCR engines frequently emit the typographic ligature codepoints their
//! training fonts contain (`ﬁ`, `ﬂ`, …). Downstream linguistic tooling wants
//! the constituent letters. NFC composition does not touch these: they only
//! decompose under compatibility (NFKC) normalisation, which would also
//! mangle superscripts and fractions. Hence the separate fixed table.

use once_cell::sync::Lazy;
use regex::Regex;

/// Fixed expansion table. Process-wide constant; expansion never produces a
/// ligature codepoint, so a single pass is complete and idempotent.
pub const LIGATURES: &[(char, &'static str)] = &[
    ('\u{FB01}', "fi"),  // ﬁ
    ('\u{FB00}', "ff"),  // ﬀ
    ('\u{FB02}', "fl"),  // ﬂ
    ('\u{FB03}', "ffi"), // ﬃ
    ('\u{FB04}', "ffl"), // ﬄ
    ('\u{0132}', "IJ"),  // Ĳ
    ('\u{0133}', "ij"),  // ĳ
    ('\u{00C6}', "AE"),  // Æ
    ('\u{00E6}', "ae"),  // æ
];

static RE_LIGATURES: Lazy<Regex> = Lazy::new(|| {
    let class: String = LIGATURES.iter().map(|&(ch, _)| ch).collect();
    Regex::new(&format!("[{class}]")).unwrap()
});

fn expansion(ch: char) -> &'static str {
    LIGATURES
        .iter()
        .find(|&&(lig, _)| lig == ch)
        .map_or("", |&(_, exp)| exp)
}

/// Replace every ligature codepoint with its ASCII expansion.
pub fn expand_ligatures(text: &str) -> String {
    RE_LIGATURES
        .replace_all(text, |caps: &regex::Captures<'_>| {
            expansion(caps[0].chars().next().unwrap_or('\0'))
        })
        .to_string()
}
