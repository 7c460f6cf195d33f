//! Grammatical annotation of cleaned definitions.
//!
//! Every extractor is an ordered list of independent rules where the first
//! match wins. A total miss is an empty field, never an error.

mod conjugation;
mod gender;
mod pos;
mod root;

use clap::ValueEnum;
use std::collections::HashSet;

use crate::assembler::RawEntry;
use crate::cleaner::clean_definition;
use crate::config::ScannerConfig;
use crate::entry::Entry;

pub use conjugation::extract_conjugation;
pub use gender::extract_gender;
pub use pos::{classify_pos, verb_evidence};
pub use root::extract_root_and_class;

/// Record shape to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// headword, definition, part of speech, gender
    Minimal,
    /// minimal fields plus root/class and the 36-slot conjugation table
    #[default]
    Rich,
}

/// Seals raw entries: cleans the definition and runs the extractors.
#[derive(Debug, Clone)]
pub struct Annotator {
    variant: Variant,
    stop_words: HashSet<String>,
}

impl Annotator {
    pub fn new(config: &ScannerConfig, variant: Variant) -> Self {
        Self {
            variant,
            stop_words: config.stop_word_set(),
        }
    }

    pub fn annotate(&self, raw: RawEntry) -> Entry {
        let definition = clean_definition(&raw.body);
        let part_of_speech = classify_pos(&definition);
        let gender = extract_gender(&definition);

        let (root_and_class, conjugations) = match self.variant {
            Variant::Minimal => (None, None),
            Variant::Rich => (
                Some(extract_root_and_class(&definition, &raw.headword, &self.stop_words)),
                Some(extract_conjugation(&definition)),
            ),
        };

        Entry {
            headword: raw.headword,
            definition,
            part_of_speech,
            gender,
            root_and_class,
            conjugations,
        }
    }
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(&ScannerConfig::default(), Variant::default())
    }
}
