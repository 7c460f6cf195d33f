//! Groups classified lines into raw entries.
//!
//! `Assembler` is the two-state accumulator (idle / accumulating). It is fed one
//! line at a time and hands back a sealed `RawEntry` whenever an entry-start
//! line closes the previous one. `Segmenter` wraps it as an iterator over any
//! line source and flushes the last entry at end of stream.

use crate::config::Markers;
use crate::line::{classify_line, trim_line_end, LineKind};
use crate::markup::strip_markup;
use crate::translit::slp1_to_iast;

/// An entry as segmented from the source: transliterated headword plus the
/// space-joined, markup-free content fragments in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Zero-based position among entry-start lines.
    pub ordinal: usize,
    pub headword: String,
    pub body: String,
}

impl RawEntry {
    /// Entry whose start line had no parsable key field.
    pub fn is_degenerate(&self) -> bool {
        self.headword.is_empty()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SegmentStats {
    pub lines_read: usize,
    pub entry_starts: usize,
    pub page_markers: usize,
    pub ignored_lines: usize,
    pub blank_lines: usize,
    pub content_fragments: usize,
    /// Content lines seen before the first entry-start line.
    pub orphan_lines: usize,
    pub degenerate_entries: usize,
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating { headword: String, body: String },
}

#[derive(Debug)]
pub struct Assembler {
    markers: Markers,
    state: State,
    next_ordinal: usize,
    stats: SegmentStats,
}

impl Assembler {
    pub fn new(markers: Markers) -> Self {
        Self {
            markers,
            state: State::Idle,
            next_ordinal: 0,
            stats: SegmentStats::default(),
        }
    }

    pub fn stats(&self) -> SegmentStats {
        self.stats
    }

    /// Feed one line. Returns the previous entry if this line sealed it.
    pub fn push_line(&mut self, line: &str) -> Option<RawEntry> {
        self.stats.lines_read += 1;
        let line = trim_line_end(line);

        match classify_line(line, &self.markers) {
            LineKind::EntryStart => {
                self.stats.entry_starts += 1;
                let headword = slp1_to_iast(self.markers.key_text(line));
                if headword.is_empty() {
                    self.stats.degenerate_entries += 1;
                }
                let previous = std::mem::replace(
                    &mut self.state,
                    State::Accumulating {
                        headword,
                        body: String::new(),
                    },
                );
                self.seal(previous)
            }
            LineKind::PageMarker => {
                self.stats.page_markers += 1;
                None
            }
            LineKind::Ignored => {
                self.stats.ignored_lines += 1;
                None
            }
            LineKind::Blank => {
                self.stats.blank_lines += 1;
                None
            }
            LineKind::Content => {
                match &mut self.state {
                    State::Accumulating { body, .. } => {
                        if let Some(fragment) = strip_markup(line) {
                            self.stats.content_fragments += 1;
                            if !body.is_empty() {
                                body.push(' ');
                            }
                            body.push_str(&fragment);
                        }
                    }
                    State::Idle => self.stats.orphan_lines += 1,
                }
                None
            }
        }
    }

    /// End of stream: seal whatever is still open.
    pub fn finish(&mut self) -> Option<RawEntry> {
        let open = std::mem::replace(&mut self.state, State::Idle);
        self.seal(open)
    }

    fn seal(&mut self, state: State) -> Option<RawEntry> {
        match state {
            State::Idle => None,
            State::Accumulating { headword, body } => {
                let ordinal = self.next_ordinal;
                self.next_ordinal += 1;
                Some(RawEntry {
                    ordinal,
                    headword,
                    body,
                })
            }
        }
    }
}

/// Iterator of raw entries over a line source.
pub struct Segmenter<I> {
    lines: I,
    assembler: Assembler,
    done: bool,
}

impl<I, S> Segmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: I, markers: Markers) -> Self {
        Self {
            lines,
            assembler: Assembler::new(markers),
            done: false,
        }
    }

    pub fn stats(&self) -> SegmentStats {
        self.assembler.stats()
    }
}

impl<I, S> Iterator for Segmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = RawEntry;

    fn next(&mut self) -> Option<RawEntry> {
        if self.done {
            return None;
        }
        for line in self.lines.by_ref() {
            if let Some(entry) = self.assembler.push_line(line.as_ref()) {
                return Some(entry);
            }
        }
        self.done = true;
        self.assembler.finish()
    }
}

/// Segment a whole line sequence at once.
pub fn segment<I, S>(lines: I, markers: Markers) -> (Vec<RawEntry>, SegmentStats)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segmenter = Segmenter::new(lines.into_iter(), markers);
    let entries: Vec<RawEntry> = segmenter.by_ref().collect();
    (entries, segmenter.stats())
}
