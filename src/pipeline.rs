//! Driving a scan: line source in, sealed entries out.

use bzip2::read::BzDecoder;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::annotate::{Annotator, Variant};
use crate::assembler::{RawEntry, SegmentStats, Segmenter};
use crate::config::{Markers, ScannerConfig};
use crate::entry::{Entry, PartOfSpeech};
use crate::error::{Result, ScanError};

const IO_BUFFER: usize = 256 * 1024;
const PROGRESS_EVERY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One pretty-printed JSON array
    #[default]
    Json,
    /// One JSON record per line
    Jsonl,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub variant: Variant,
    /// Stop after this many entries have been emitted
    pub limit: Option<usize>,
    /// Leave out entries whose start line had no key field
    pub drop_degenerate: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub segment: SegmentStats,
    pub entries_emitted: usize,
    pub degenerate_dropped: usize,
    pub verbs: usize,
    pub nouns: usize,
    pub undetermined: usize,
    pub with_gender: usize,
    pub with_root: usize,
    pub conjugation_forms: usize,
    pub limit_reached: bool,
    pub elapsed: Duration,
}

impl ScanStats {
    /// Tally an emitted entry.
    pub fn record(&mut self, entry: &Entry) {
        self.entries_emitted += 1;
        match entry.part_of_speech {
            PartOfSpeech::Verb => self.verbs += 1,
            PartOfSpeech::Noun => self.nouns += 1,
            PartOfSpeech::Undetermined => self.undetermined += 1,
        }
        if !entry.gender.is_empty() {
            self.with_gender += 1;
        }
        if entry.root_and_class.as_deref().is_some_and(|r| !r.is_empty()) {
            self.with_root += 1;
        }
        if let Some(conj) = &entry.conjugations {
            self.conjugation_forms += conj.filled();
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanOutput {
    pub entries: Vec<Entry>,
    pub stats: ScanStats,
}

/// Whether a raw entry goes on to annotation; counts drops.
pub(crate) fn admit(raw: &RawEntry, options: &ScanOptions, stats: &mut ScanStats) -> bool {
    if options.drop_degenerate && raw.is_degenerate() {
        stats.degenerate_dropped += 1;
        return false;
    }
    true
}

pub(crate) fn limit_hit(count: usize, options: &ScanOptions) -> bool {
    options.limit.is_some_and(|l| count >= l)
}

pub fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb
}

pub(crate) fn report_progress(pb: &ProgressBar, stats: &ScanStats, lines_read: usize, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64().max(f64::EPSILON);
    pb.set_message(format!(
        "Entries: {} | Lines: {} | Verbs: {} | Nouns: {} | Rate: {:.0} entries/s",
        stats.entries_emitted,
        lines_read,
        stats.verbs,
        stats.nouns,
        stats.entries_emitted as f64 / elapsed
    ));
}

/// Sequential fold over a line sequence: segment, clean, annotate, in
/// source order.
pub fn scan_lines<I, S>(
    lines: I,
    markers: Markers,
    annotator: &Annotator,
    options: &ScanOptions,
    pb: &ProgressBar,
) -> ScanOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let start = Instant::now();
    let mut output = ScanOutput::default();
    let mut segmenter = Segmenter::new(lines.into_iter(), markers);

    loop {
        if limit_hit(output.entries.len(), options) {
            output.stats.limit_reached = true;
            break;
        }
        let Some(raw) = segmenter.next() else {
            break;
        };
        if !admit(&raw, options, &mut output.stats) {
            continue;
        }
        let entry = annotator.annotate(raw);
        output.stats.record(&entry);
        output.entries.push(entry);

        if output.stats.entries_emitted % PROGRESS_EVERY == 0 {
            report_progress(pb, &output.stats, segmenter.stats().lines_read, start);
        }
    }

    output.stats.segment = segmenter.stats();
    output.stats.elapsed = start.elapsed();
    output
}

/// Lines of a reader, decoded lossily like the rest of the dump tooling;
/// stops at the first read error and keeps it for the caller.
pub(crate) struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl<R: BufRead> LossyLines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            error: None,
        }
    }

    pub(crate) fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(&self.buf).into_owned()),
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

/// Sequential scan of a reader. Read errors abort the scan.
pub fn scan_reader(
    reader: impl BufRead,
    config: &ScannerConfig,
    options: &ScanOptions,
    pb: &ProgressBar,
) -> Result<ScanOutput> {
    let markers = config.markers()?;
    let annotator = Annotator::new(config, options.variant);
    let mut lines = LossyLines::new(reader);
    let output = scan_lines(&mut lines, markers, &annotator, options, pb);
    if let Some(e) = lines.take_error() {
        return Err(ScanError::Io(e));
    }
    Ok(output)
}

/// Open the source dump; `.bz2` files are decompressed on the fly.
pub fn open_input(path: &Path) -> Result<Box<dyn BufRead + Send>> {
    if !path.exists() {
        return Err(ScanError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let reader: Box<dyn BufRead + Send> = if path.to_string_lossy().ends_with(".bz2") {
        Box::new(BufReader::with_capacity(IO_BUFFER, BzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(IO_BUFFER, file))
    };
    Ok(reader)
}

pub fn write_entries<W: Write>(entries: &[Entry], mut writer: W, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, entries)?;
            writeln!(writer)?;
        }
        OutputFormat::Jsonl => {
            for entry in entries {
                serde_json::to_writer(&mut writer, entry)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write all entries to `path` in one go, after scanning has finished.
pub fn write_output(path: &Path, entries: &[Entry], format: OutputFormat) -> Result<()> {
    let file = File::create(path)?;
    write_entries(entries, BufWriter::with_capacity(IO_BUFFER, file), format)
}
