//! Two-phase processing: segment sequentially, annotate in parallel.
//!
//! Entry boundaries are only known in stream order, so phase 1 is always a
//! single pass. Once raw entries exist they are independent; phase 2 splits
//! them into contiguous chunks, one std thread per chunk, and concatenates
//! the results in chunk order so output order equals source order.

use indicatif::ProgressBar;
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::annotate::Annotator;
use crate::assembler::{RawEntry, Segmenter};
use crate::config::ScannerConfig;
use crate::entry::Entry;
use crate::error::{Result, ScanError};
use crate::pipeline::{admit, limit_hit, LossyLines, ScanOptions, ScanOutput, ScanStats};

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads to use
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let cpus = thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4);
        Self { num_threads: cpus }
    }
}

/// Annotate raw entries across threads, preserving input order.
pub fn annotate_parallel(raws: Vec<RawEntry>, annotator: &Annotator, num_threads: usize) -> Vec<Entry> {
    if raws.is_empty() {
        return vec![];
    }

    let num_threads = num_threads.min(raws.len()).max(1);
    let chunk_size = raws.len().div_ceil(num_threads);
    let total = raws.len();

    let mut chunks: Vec<Vec<RawEntry>> = Vec::with_capacity(num_threads);
    let mut rest = raws.into_iter();
    loop {
        let chunk: Vec<RawEntry> = rest.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }

    let handles: Vec<JoinHandle<Vec<Entry>>> = chunks
        .into_iter()
        .map(|chunk| {
            let annotator = annotator.clone();
            thread::spawn(move || {
                chunk
                    .into_iter()
                    .map(|raw| annotator.annotate(raw))
                    .collect()
            })
        })
        .collect();

    let mut all_results: Vec<Entry> = Vec::with_capacity(total);
    for handle in handles {
        match handle.join() {
            Ok(chunk_results) => all_results.extend(chunk_results),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    all_results
}

/// Phase 1: read and segment everything. Phase 2: annotate in parallel.
pub fn process_two_phase(
    reader: impl BufRead,
    config: &ScannerConfig,
    options: &ScanOptions,
    parallel: &ParallelConfig,
    pb: &ProgressBar,
) -> Result<ScanOutput> {
    let start_time = Instant::now();
    let markers = config.markers()?;
    let annotator = Annotator::new(config, options.variant);
    let mut stats = ScanStats::default();

    eprintln!("Phase 1: Segmenting entries...");
    let mut lines = LossyLines::new(reader);
    let mut raws: Vec<RawEntry> = Vec::new();
    let segment_stats = {
        let mut segmenter = Segmenter::new(&mut lines, markers);
        loop {
            if limit_hit(raws.len(), options) {
                stats.limit_reached = true;
                break;
            }
            let Some(raw) = segmenter.next() else {
                break;
            };
            if !admit(&raw, options, &mut stats) {
                continue;
            }
            raws.push(raw);
        }
        segmenter.stats()
    };
    if let Some(e) = lines.take_error() {
        return Err(ScanError::Io(e));
    }
    stats.segment = segment_stats;
    eprintln!("Segmented {} entries in {:?}", raws.len(), start_time.elapsed());

    eprintln!(
        "Phase 2: Annotating in parallel with {} threads...",
        parallel.num_threads
    );
    pb.set_message(format!("Annotating {} entries", raws.len()));
    let annotate_start = Instant::now();
    let entries = annotate_parallel(raws, &annotator, parallel.num_threads);
    eprintln!("Annotated {} entries in {:?}", entries.len(), annotate_start.elapsed());

    for entry in &entries {
        stats.record(entry);
    }
    stats.elapsed = start_time.elapsed();

    Ok(ScanOutput { entries, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Variant;
    use crate::pipeline::scan_reader;
    use std::io::Cursor;

    fn sample_dump(entries: usize) -> String {
        let keys = ["gacCati", "naraH", "agni", "jala", "kfzRa", "BUmi", "deva"];
        let bodies = [
            "class. 1. P. to go.",
            "m. a man.",
            "m. fire, the god of fire",
            "n. water",
            "mfn. black, dark",
            "f. the earth",
            "mfn. heavenly, divine; m. a god",
        ];
        let mut dump = String::new();
        for i in 0..entries {
            dump.push_str(&format!("<L>{}<k1>{}<k2>\n", i + 1, keys[i % keys.len()]));
            dump.push_str(bodies[i % bodies.len()]);
            dump.push('\n');
            if i % 5 == 4 {
                dump.push_str("[Page 1]\n");
            }
        }
        dump
    }

    fn raw(ordinal: usize, headword: &str, body: &str) -> RawEntry {
        RawEntry {
            ordinal,
            headword: headword.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn empty_input() {
        let entries = annotate_parallel(vec![], &Annotator::default(), 4);
        assert!(entries.is_empty());
    }

    #[test]
    fn more_threads_than_entries() {
        let raws = vec![raw(0, "naraḥ", "m. a man."), raw(1, "gacchati", "class. 1. P. to go.")];
        let entries = annotate_parallel(raws, &Annotator::default(), 16);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].headword, "naraḥ");
        assert_eq!(entries[1].headword, "gacchati");
    }

    #[test]
    fn preserves_order() {
        let raws: Vec<RawEntry> = (0..103).map(|i| raw(i, &format!("w{i}"), "n. a thing")).collect();
        let entries = annotate_parallel(raws, &Annotator::default(), 4);
        let heads: Vec<String> = entries.iter().map(|e| e.headword.clone()).collect();
        let expected: Vec<String> = (0..103).map(|i| format!("w{i}")).collect();
        assert_eq!(heads, expected);
    }

    #[test]
    fn two_phase_matches_sequential() {
        let dump = sample_dump(57);
        let config = ScannerConfig::default();
        let options = ScanOptions {
            variant: Variant::Rich,
            ..ScanOptions::default()
        };
        let pb = ProgressBar::hidden();

        let sequential = scan_reader(Cursor::new(dump.clone()), &config, &options, &pb).unwrap();
        let parallel = process_two_phase(
            Cursor::new(dump),
            &config,
            &options,
            &ParallelConfig { num_threads: 3 },
            &pb,
        )
        .unwrap();

        assert_eq!(sequential.entries, parallel.entries);
        assert_eq!(sequential.stats.segment, parallel.stats.segment);
        assert_eq!(sequential.stats.nouns, parallel.stats.nouns);
        assert_eq!(sequential.stats.verbs, parallel.stats.verbs);
    }

    #[test]
    fn two_phase_respects_limit() {
        let options = ScanOptions {
            limit: Some(5),
            ..ScanOptions::default()
        };
        let out = process_two_phase(
            Cursor::new(sample_dump(20)),
            &ScannerConfig::default(),
            &options,
            &ParallelConfig { num_threads: 2 },
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert_eq!(out.entries.len(), 5);
        assert!(out.stats.limit_reached);
    }

    #[test]
    fn two_phase_zero_limit() {
        let options = ScanOptions {
            limit: Some(0),
            ..ScanOptions::default()
        };
        let out = process_two_phase(
            Cursor::new(sample_dump(4)),
            &ScannerConfig::default(),
            &options,
            &ParallelConfig { num_threads: 2 },
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert!(out.entries.is_empty());
        assert!(out.stats.limit_reached);
    }
}
