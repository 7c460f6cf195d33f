use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use mw_scanner::pipeline::progress_bar;
use mw_scanner::{
    open_input, process_two_phase, scan_reader, write_output, OutputFormat, ParallelConfig,
    Result, ScanOptions, ScanStats, ScannerConfig, Variant,
};

/// Processing strategy for the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Segment and annotate in one sequential pass
    Sequential,
    /// Segment first, then annotate entries across threads
    TwoPhase,
}

#[derive(Parser)]
#[command(name = "mw-scanner")]
#[command(about = "Converts the Monier-Williams dictionary dump into annotated JSON entries")]
struct Args {
    /// Input dictionary dump (.txt or .txt.bz2)
    #[arg(default_value = "mw72.txt")]
    input: PathBuf,

    /// Output file
    #[arg(default_value = "sanskrit_dictionary.json")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Record shape
    #[arg(long, value_enum, default_value_t = Variant::Rich)]
    variant: Variant,

    /// Processing strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::Sequential)]
    strategy: Strategy,

    /// Number of threads for two-phase (0 = auto-detect)
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// Limit number of entries to extract (for testing)
    #[arg(long)]
    limit: Option<usize>,

    /// Leave out entries whose start line has no key field
    #[arg(long)]
    drop_degenerate: bool,

    /// Path to scanner config YAML (default: mw-scanner.yaml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

fn print_stats(stats: &ScanStats, strategy_name: &str) {
    let seg = &stats.segment;
    println!();
    println!("============================================================");
    println!("Strategy: {}", strategy_name);
    println!("Lines read: {}", seg.lines_read);
    println!("Entry starts: {}", seg.entry_starts);
    println!("Entries written: {}", stats.entries_emitted);
    println!("------------------------------------------------------------");
    println!("Part of speech:");
    println!("  verb: {}", stats.verbs);
    println!("  noun: {}", stats.nouns);
    println!("  undetermined: {}", stats.undetermined);
    println!("With gender: {}", stats.with_gender);
    println!("With root/class: {}", stats.with_root);
    println!("Conjugation forms found: {}", stats.conjugation_forms);
    println!("------------------------------------------------------------");
    println!("Page markers: {}", seg.page_markers);
    println!("Ignored directive lines: {}", seg.ignored_lines);
    println!("Blank lines: {}", seg.blank_lines);
    println!("Lines before first entry: {}", seg.orphan_lines);
    println!("Entries without key field: {}", seg.degenerate_entries);
    println!("Dropped without key field: {}", stats.degenerate_dropped);
    println!("Time: {}m {}s", stats.elapsed.as_secs() / 60, stats.elapsed.as_secs() % 60);
    println!(
        "Rate: {:.0} entries/sec",
        stats.entries_emitted as f64 / stats.elapsed.as_secs_f64().max(f64::EPSILON)
    );
    println!("============================================================");
}

fn run(args: &Args) -> Result<()> {
    let config = ScannerConfig::discover(args.config.as_ref())?;

    // Missing input aborts before anything is written
    let reader = open_input(&args.input)?;

    let options = ScanOptions {
        variant: args.variant,
        limit: args.limit,
        drop_degenerate: args.drop_degenerate,
    };

    let mut parallel = ParallelConfig::default();
    if args.threads > 0 {
        parallel.num_threads = args.threads;
    }

    if !args.quiet {
        println!("Parsing: {}", args.input.display());
        println!("Output: {}", args.output.display());
        println!("Strategy: {:?}", args.strategy);
        if args.strategy != Strategy::Sequential {
            println!("Threads: {}", parallel.num_threads);
        }
        if let Some(limit) = args.limit {
            println!("Limit: {} entries", limit);
        }
        println!();
    }

    let pb = progress_bar(args.quiet);
    let output = match args.strategy {
        Strategy::Sequential => scan_reader(reader, &config, &options, &pb)?,
        Strategy::TwoPhase => process_two_phase(reader, &config, &options, &parallel, &pb)?,
    };

    if output.stats.limit_reached && !args.quiet {
        pb.finish_with_message(format!("Reached limit of {} entries", output.entries.len()));
    } else {
        pb.finish_and_clear();
    }

    write_output(&args.output, &output.entries, args.format)?;

    if !args.quiet {
        println!(
            "Finished parsing. Found {} entries.",
            output.stats.entries_emitted
        );
        println!("Dictionary saved to {}", args.output.display());
        print_stats(&output.stats, &format!("{:?}", args.strategy));
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
