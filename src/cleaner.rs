//! Spacing repair for assembled definitions.
//!
//! Line-wrapped typesetting leaves stray blanks before punctuation and inside
//! parentheses, and drops the blank after a period at line joins.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "q.v." (which see), optionally parenthesised
    static ref CROSS_REFERENCE: Regex = Regex::new(r"(?i)\(\s*q\s*\.\s*v\s*\.\s*\)|\bq\s*\.\s*v\s*\.").unwrap();
    static ref PUNCTUATION: Regex = Regex::new(r"\s*([.,;:])\s*").unwrap();
    static ref OPEN_PAREN: Regex = Regex::new(r"\(\s+").unwrap();
    static ref CLOSE_PAREN: Regex = Regex::new(r"\s+\)").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub fn clean_definition(raw: &str) -> String {
    let mut text = WHITESPACE.replace_all(raw, " ").into_owned();

    // removal can splice a new match together
    while CROSS_REFERENCE.is_match(&text) {
        text = CROSS_REFERENCE.replace_all(&text, " ").into_owned();
    }

    let text = PUNCTUATION.replace_all(&text, "$1 ");
    let text = OPEN_PAREN.replace_all(&text, "(");
    let text = CLOSE_PAREN.replace_all(&text, ")");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_definition("  a   man \t of\n rank  "), "a man of rank");
    }

    #[test]
    fn tightens_parentheses() {
        assert_eq!(clean_definition("fire ( as a god )"), "fire (as a god)");
    }

    #[test]
    fn one_space_after_period_and_colon() {
        assert_eq!(clean_definition("m.a man .Cf:x"), "m. a man. Cf: x");
        assert_eq!(clean_definition("class. 1.  P. to go."), "class. 1. P. to go.");
    }

    #[test]
    fn one_space_after_comma_and_semicolon() {
        assert_eq!(clean_definition("to go ,to move;to walk"), "to go, to move; to walk");
    }

    #[test]
    fn removes_cross_reference_marker() {
        assert_eq!(clean_definition("the god Agni q.v. , fire"), "the god Agni, fire");
        assert_eq!(clean_definition("see Agni (q. v.) above"), "see Agni above");
        assert_eq!(clean_definition("q. q.v. v."), "");
    }

    #[test]
    fn removes_spaced_cross_reference_marker() {
        assert_eq!(clean_definition("see Agni q .v. above"), "see Agni above");
        assert_eq!(clean_definition("fire q. v . god"), "fire god");
        assert_eq!(clean_definition("fire ( q . v . ) god"), "fire god");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(clean_definition(""), "");
        assert_eq!(clean_definition("   "), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "class. 1. P. to go.",
            "m. a man , hero ( as opp. to god ) ;RV .",
            "(. x",
            "a . ) b",
            "e.g.the q.v.end",
            "1.5 , 2:3",
            "x ( , ) y",
            "…..; ;",
            "( q.v. )",
            "see Agni q .v. above",
            "fire q. v . god",
        ];
        for sample in samples {
            let once = clean_definition(sample);
            assert_eq!(clean_definition(&once), once, "input: {sample:?}");
        }
    }
}
