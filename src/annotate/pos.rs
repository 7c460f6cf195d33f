use lazy_static::lazy_static;
use regex::Regex;

use crate::entry::PartOfSpeech;

lazy_static! {
    /// Conjugation class followed by a voice: "cl. 1. P.", "class 10. Ā.", "cl. 4. A."
    pub(crate) static ref CLASS_AND_VOICE: Regex =
        Regex::new(r"\b(?i:cl|class)\.?\s*(\d{1,2})\.?\s*(?:P|Ā|A)\.").unwrap();
    /// Root sign, optionally followed by a class: "√ gam", "√gam cl. 1"
    pub(crate) static ref ROOT_SIGN: Regex =
        Regex::new(r"√\s*([^\s]+)(?:\s*,?\s*(?i:cl|class)\.?\s*(\d{1,2}))?").unwrap();
    /// Parenthetical root reference: "(√ gam)", "(fr. √ gam)", "(rt. gam)"
    pub(crate) static ref PAREN_ROOT: Regex =
        Regex::new(r"\((?:fr\.\s*)?(?:√|rt\.)\s*([^)\s]+)\s*\)").unwrap();
    /// Secondary conjugation tags
    static ref DERIVED_VERB: Regex =
        Regex::new(r"\b(?:Caus|Intens|Desid|Denom|Nom)\.").unwrap();

    /// Verb evidence, in priority order
    static ref VERB_RULES: Vec<(&'static str, &'static Regex)> = vec![
        ("class-and-voice", &*CLASS_AND_VOICE),
        ("root-sign", &*ROOT_SIGN),
        ("parenthetical-root", &*PAREN_ROOT),
        ("derived-verb", &*DERIVED_VERB),
    ];

    /// Gender and substantive abbreviations: "m.", "f.", "n.", "mfn.", "mf.", "sbst."
    static ref NOUN_MARKER: Regex =
        Regex::new(r"\b(?:m|f|n|mfn|mf|mn|fn|nf|nm|sbst|subst)\.").unwrap();
}

/// Name of the first verb rule that matches, if any.
pub fn verb_evidence(definition: &str) -> Option<&'static str> {
    VERB_RULES
        .iter()
        .find(|(_, rule)| rule.is_match(definition))
        .map(|(name, _)| *name)
}

pub fn classify_pos(definition: &str) -> PartOfSpeech {
    if verb_evidence(definition).is_some() {
        PartOfSpeech::Verb
    } else if NOUN_MARKER.is_match(definition) {
        PartOfSpeech::Noun
    } else {
        PartOfSpeech::Undetermined
    }
}
