//! Pipeline stages for text normalisation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and preserves
//! the load-bearing ordering between them: several rules only work because
//! an earlier stage has already rewritten the text (the soft-hyphen rule
//! must see line breaks before the structural stage collapses them; quote
//! rules must not re-match the ASCII output of the hyphen rules).
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ strip ──▶ boilerplate ──▶ ligatures ──▶ simplify ──▶ normalise
//! (UTF-8+NFC) (front/back) (optional)   (ﬁ→fi)    (“”—…→ASCII)  (paragraphs)
//! ```
//!
//! 1. [`load`]        — read bytes, decode strict UTF-8, compose to NFC
//! 2. [`strip`]       — excise front/back matter per the line-range table,
//!    persisting the excised lines to side files
//! 3. [`boilerplate`] — detect the publisher marker and hand the text to an
//!    injectable stripper (the only pluggable stage)
//! 4. [`ligatures`]   — expand single-codepoint Latin ligatures to ASCII
//! 5. [`simplify`]    — collapse Unicode space/punctuation variants onto a
//!    small ASCII set, drop invisible formatting characters
//! 6. [`normalise`]   — line endings, separator lines, whitespace, one
//!    paragraph per line

pub mod boilerplate;
pub mod ligatures;
pub mod load;
pub mod normalise;
pub mod simplify;
pub mod strip;

/// The fixed cleaning pipeline: ligature expansion, then punctuation/space
/// simplification, then structural normalisation.
///
/// Pure function over the already loaded (and possibly excised) text. The
/// composition is idempotent: no stage re-matches text an earlier
/// application has already rewritten, so `clean(clean(t)) == clean(t)`.
pub fn clean(text: &str) -> String {
    let s = ligatures::expand_ligatures(text);
    let s = simplify::simplify_punctuation(&s);
    normalise::normalise_structure(&s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_is_idempotent() {
        let input = "A ﬁne\u{00A0}day —\u{00AD}\nyes…\r\n\r\n\r\n  second  paragraph\t\n=====\nthird\n";
        let once = clean(input);
        let twice = clean(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_produces_one_paragraph_per_line() {
        let input = "First paragraph,\nstill first.\n\n\n\nSecond   paragraph.\n";
        assert_eq!(
            clean(input),
            "First paragraph,\nstill first.\nSecond paragraph."
        );
    }

    #[test]
    fn clean_handles_the_full_mix() {
        let input = "‘De ﬁlosoof’\u{2014}zei hij…\n\n* * *\n\nEinde.";
        assert_eq!(clean(input), "'De filosoof' - zei hij...\nEinde.");
    }
}
