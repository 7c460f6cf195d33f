//! Scanner for the Monier-Williams 1872 Sanskrit-English dictionary dump.
//!
//! Turns the tagged, line-oriented source text into a list of entry records:
//! lines are classified, markup is stripped, headwords are transliterated from
//! SLP1 to IAST, content is grouped per entry, and each definition is cleaned
//! and annotated with part of speech, gender, verb root/class and any quoted
//! inflected forms.

pub mod annotate;
pub mod assembler;
pub mod cleaner;
pub mod config;
pub mod entry;
pub mod error;
pub mod line;
pub mod markup;
pub mod parallel;
pub mod pipeline;
pub mod translit;

pub use annotate::{Annotator, Variant};
pub use assembler::{segment, RawEntry, SegmentStats, Segmenter};
pub use cleaner::clean_definition;
pub use config::{Markers, ScannerConfig};
pub use entry::{Conjugation, Entry, Gender, Number, PartOfSpeech, Person, Tense};
pub use error::{Result, ScanError};
pub use line::{classify_line, LineKind};
pub use markup::strip_markup;
pub use parallel::{process_two_phase, ParallelConfig};
pub use pipeline::{
    open_input, scan_lines, scan_reader, write_entries, write_output, OutputFormat, ScanOptions,
    ScanOutput, ScanStats,
};
pub use translit::slp1_to_iast;
