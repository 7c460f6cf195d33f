use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashSet;

use super::pos::{CLASS_AND_VOICE, PAREN_ROOT, ROOT_SIGN};

lazy_static! {
    /// Class-and-voice followed by the token after it: "cl. 1. P. gacchati"
    static ref CLASS_VOICE_TOKEN: Regex = Regex::new(&format!(
        r"{}\s*([^\s]+)",
        CLASS_AND_VOICE.as_str()
    ))
    .unwrap();
    static ref BARE_CLASS: Regex = Regex::new(r"\b(?i:cl|class)\.?\s*(\d{1,2})\b").unwrap();
}

/// Punctuation for root candidates, including the typographic marks the
/// dump uses.
fn is_punct(ch: char) -> bool {
    ch.is_ascii_punctuation() || matches!(ch, '√' | '¦' | '—' | '–' | '‘' | '’' | '“' | '”' | '…')
}

/// Trimmed root candidate, or `None` if it is not a plausible root.
fn accept_root(candidate: &str, stop_words: &HashSet<String>) -> Option<String> {
    let root = candidate.trim_matches(|c: char| is_punct(c) || c.is_whitespace());
    if root.chars().count() < 2 {
        return None;
    }
    if root.chars().any(is_punct) {
        return None;
    }
    if stop_words.contains(&root.to_lowercase()) {
        return None;
    }
    Some(root.to_string())
}

fn capture_str<'t>(cap: &Captures<'t>, group: usize) -> Option<&'t str> {
    cap.get(group).map(|m| m.as_str())
}

fn format_root(root: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!("{} {}", root, class).trim().to_string(),
        None => root.trim().to_string(),
    }
}

/// Verb root and conjugation class as `"<root> <class>"`.
///
/// Rules are tried in order: the token after a class-and-voice marker, the
/// token after a root sign, then a parenthetical root. A rejected candidate
/// falls through to the next rule. With no usable root but a bare class
/// marker present, the headword stands in for the root.
pub fn extract_root_and_class(definition: &str, headword: &str, stop_words: &HashSet<String>) -> String {
    let bare_class = BARE_CLASS
        .captures(definition)
        .and_then(|cap| capture_str(&cap, 1));

    if let Some(cap) = CLASS_VOICE_TOKEN.captures(definition) {
        if let Some(root) = capture_str(&cap, 2).and_then(|c| accept_root(c, stop_words)) {
            return format_root(&root, capture_str(&cap, 1));
        }
    }

    if let Some(cap) = ROOT_SIGN.captures(definition) {
        if let Some(root) = capture_str(&cap, 1).and_then(|c| accept_root(c, stop_words)) {
            return format_root(&root, capture_str(&cap, 2).or(bare_class));
        }
    }

    if let Some(cap) = PAREN_ROOT.captures(definition) {
        if let Some(root) = capture_str(&cap, 1).and_then(|c| accept_root(c, stop_words)) {
            return format_root(&root, bare_class);
        }
    }

    match bare_class {
        Some(class) if !headword.is_empty() => format_root(headword, Some(class)),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;

    fn root(definition: &str, headword: &str) -> String {
        extract_root_and_class(definition, headword, &ScannerConfig::default().stop_word_set())
    }

    #[test]
    fn token_after_class_and_voice() {
        assert_eq!(root("cl. 1. P. gacchati, to go", "gam"), "gacchati 1");
    }

    #[test]
    fn stop_word_falls_back_to_headword() {
        assert_eq!(root("class. 1. P. to go.", "gacchati"), "gacchati 1");
    }

    #[test]
    fn root_sign_with_class() {
        assert_eq!(root("a going, fr. √ gam cl. 1", "gamana"), "gam 1");
        assert_eq!(root("a going, fr. √gam.", "gamana"), "gam");
    }

    #[test]
    fn root_sign_takes_class_from_elsewhere() {
        assert_eq!(root("√ vid, cl. 2. P. to know", "veda"), "vid 2");
    }

    #[test]
    fn parenthetical_root() {
        assert_eq!(root("a goer (rt. gam)", "gantf"), "gam");
    }

    #[test]
    fn rejects_short_and_punctuated_candidates() {
        assert_eq!(root("√ a", "x"), "");
        assert_eq!(root("√ g-m", "x"), "");
        assert_eq!(root("(√ kṛ)", "kara"), "kṛ");
    }

    #[test]
    fn no_match_gives_empty() {
        assert_eq!(root("m. a man.", "naraḥ"), "");
        assert_eq!(root("", ""), "");
    }

    #[test]
    fn bare_class_without_headword_is_empty() {
        assert_eq!(root("class. 1. P. to go.", ""), "");
    }
}
