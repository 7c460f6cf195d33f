//! Inline markup removal for content lines.
//!
//! The dump interleaves prose with `{#...#}` / `{@...@}` style annotations,
//! XML-ish tags such as `<ab>` and a broken-bar glyph that marks the end of the
//! headword block. All of it goes; the prose between stays as it was, apart from NFC
//! composition of decomposed diacritics.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref BRACE_SPAN: Regex = Regex::new(r"\{[^}]*\}").unwrap();
    static ref ANGLE_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Broken bar as it appears after a latin-1 mis-decode, then the glyph itself.
const BROKEN_BAR_ARTIFACTS: &[&str] = &["\u{00C2}\u{00A6}", "\u{00A6}"];

/// Clean one content line. Returns `None` when nothing but markup was there.
pub fn strip_markup(line: &str) -> Option<String> {
    let cleaned = BRACE_SPAN.replace_all(line, "");
    let mut cleaned = ANGLE_TAG.replace_all(&cleaned, "").into_owned();
    for artifact in BROKEN_BAR_ARTIFACTS {
        if cleaned.contains(artifact) {
            cleaned = cleaned.replace(artifact, "");
        }
    }

    let normalized: String = cleaned.trim().nfc().collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
