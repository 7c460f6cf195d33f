//! Gender from abbreviation letters.
//!
//! The single-letter rules are bare word-boundary matches and will fire on
//! ordinary prose that contains a lone m, f or n. That is the accepted
//! behaviour of this heuristic; do not tighten it here.

use lazy_static::lazy_static;
use regex::Regex;

use crate::entry::Gender;

lazy_static! {
    static ref ALL_GENDERS: Regex = Regex::new(r"(?i)\bmfn\.").unwrap();
    static ref MASCULINE: Regex = Regex::new(r"(?i)\bm\b").unwrap();
    static ref FEMININE: Regex = Regex::new(r"(?i)\bf\b").unwrap();
    static ref NEUTER: Regex = Regex::new(r"(?i)\bn\b").unwrap();
}

pub fn extract_gender(definition: &str) -> Gender {
    if ALL_GENDERS.is_match(definition) {
        return Gender::ALL;
    }
    Gender {
        masculine: MASCULINE.is_match(definition),
        feminine: FEMININE.is_match(definition),
        neuter: NEUTER.is_match(definition),
    }
}
