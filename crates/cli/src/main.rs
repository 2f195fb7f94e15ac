//! Cache simulator CLI.
//!
//! This binary replays a memory trace against one or all cache configurations. It performs:
//! 1. **Argument handling:** Cache type selector, verbosity, optional JSON config file.
//! 2. **Replay:** Feeds every trace record to the selected caches.
//! 3. **Reporting:** Prints the verbose per-access trace and the hit/miss summary, or JSON.
//!
//! Failures map to distinct exit codes (see [`exit_code`]).

use clap::Parser;
use clap::error::ErrorKind;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use std::{fs, process};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::{SimError, TraceError};
use cachesim_core::config::{Config, ModeSelector};
use cachesim_core::core::cache::observer::NullObserver;
use cachesim_core::sim::report::{self, VerboseTrace};
use cachesim_core::sim::{Simulator, trace};

/// Exit code for bad or missing arguments.
const EXIT_USAGE: i32 = 1;
/// Exit code when the trace cannot be opened or read.
const EXIT_INPUT: i32 = 2;
/// Exit code when the trace operand is missing or repeated.
const EXIT_OPERANDS: i32 = 3;
/// Exit code for verbose output combined with all modes.
const EXIT_VERBOSE_ALL: i32 = 4;
/// Exit code for an invalid cache type selector.
const EXIT_SELECTOR: i32 = 44;
/// Exit code for a malformed trace record.
const EXIT_DATA: i32 = 65;
/// Exit code for a cache driven with the wrong mode.
const EXIT_CACHE_TYPE: i32 = 66;
/// Exit code for cache allocation failure.
const EXIT_ALLOC: i32 = 99;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a memory trace against a 64-line cache with 16-byte blocks and LRU replacement.\n\nCache types:\n  0  direct mapped (64 sets x 1 line)\n  1  2-way set associative (32 sets x 2 lines)\n  2  4-way set associative (16 sets x 4 lines)\n  3  fully associative (1 set x 64 lines)\n  4  all of the above\n\nExamples:\n  cachesim -t 1 traces/gcc.trace\n  cachesim -v -t 3 traces/short.trace\n  cat traces/gcc.trace | cachesim -t 4 -"
)]
struct Cli {
    /// Print the per-access trace (not allowed with cache type 4).
    #[arg(short, long)]
    verbose: bool,

    /// Cache type selector (0-4).
    #[arg(short = 't', long = "type", value_name = "CACHE_TYPE", allow_negative_numbers = true)]
    cache_type: Option<i64>,

    /// JSON configuration file; command-line flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long, conflicts_with = "verbose")]
    json: bool,

    /// Trace file, or `-` for standard input. Exactly one is required.
    #[arg(value_name = "TRACE")]
    traces: Vec<PathBuf>,
}

/// Usage line printed after argument errors.
const USAGE: &str = "usage: cachesim [-v] -t cache_type filename";

fn main() {
    init_logging();

    let cli = Cli::try_parse().unwrap_or_else(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
        _ => {
            let _ = e.print();
            eprintln!("{USAGE}");
            process::exit(EXIT_USAGE);
        }
    });

    let config = load_config(&cli).unwrap_or_else(|e| fail(&e));
    let Some(trace) = single_operand(&cli.traces) else {
        eprintln!("{USAGE}");
        process::exit(EXIT_OPERANDS);
    };

    if let Err(e) = run(&cli, &config, trace) {
        fail(&e);
    }
}

/// Reports `err` and exits with its code.
fn fail(err: &SimError) -> ! {
    eprintln!("{err}");
    process::exit(exit_code(err))
}

/// Returns the trace path when exactly one operand was given.
fn single_operand(operands: &[PathBuf]) -> Option<&Path> {
    match operands {
        [trace] => Some(trace.as_path()),
        _ => None,
    }
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Maps an error to the process exit code.
fn exit_code(err: &SimError) -> i32 {
    match err {
        SimError::InvalidMode(_) | SimError::InvalidSelector(_) => EXIT_SELECTOR,
        SimError::VerboseWithAll => EXIT_VERBOSE_ALL,
        SimError::GeometryMismatch { .. } => EXIT_CACHE_TYPE,
        SimError::Allocation { .. } | SimError::InvalidGeometry { .. } => EXIT_ALLOC,
        SimError::Config(_) => EXIT_USAGE,
        SimError::Trace(TraceError::Io(_)) => EXIT_INPUT,
        SimError::Trace(TraceError::Malformed { .. }) => EXIT_DATA,
    }
}

/// Builds the run configuration: config file first, then flag overrides.
fn load_config(cli: &Cli) -> Result<Config, SimError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(TraceError::Io)?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    if cli.verbose {
        config.general.verbose = true;
    }
    if let Some(raw) = cli.cache_type {
        let raw = u8::try_from(raw).map_err(|_| SimError::InvalidSelector(raw))?;
        config.cache.selector = ModeSelector::try_from(raw)?;
    }
    config.validate()?;
    Ok(config)
}

/// Replays the trace and prints the results.
fn run(cli: &Cli, config: &Config, trace_path: &Path) -> Result<(), SimError> {
    let trace_name = trace_path.display().to_string();
    let records = trace::open(trace_path)?;
    let mut sim = Simulator::from_config(config)?;
    tracing::info!(trace = %trace_name, selector = ?config.cache.selector, "replaying trace");

    let stdout = io::stdout();
    let start = Instant::now();

    if cli.json {
        let _ = sim.run(records, &mut NullObserver)?;
        let report = sim.report(&trace_name, start.elapsed());
        let json = report.to_json()?;
        writeln!(stdout.lock(), "{json}").map_err(TraceError::Io)?;
        return Ok(());
    }

    let mut out = stdout.lock();
    report::write_preamble(&mut out, &trace_name, config.general.verbose).map_err(TraceError::Io)?;
    if config.general.verbose {
        if let ModeSelector::Single(mode) = config.cache.selector {
            report::write_mode_header(&mut out, mode).map_err(TraceError::Io)?;
        }
        let mut verbose = VerboseTrace::new(out);
        let _ = sim.run(records, &mut verbose)?;
        out = verbose.finish().map_err(TraceError::Io)?;
    } else {
        let _ = sim.run(records, &mut NullObserver)?;
    }

    sim.report(&trace_name, start.elapsed())
        .write_summary(&mut out)
        .map_err(TraceError::Io)?;
    out.flush().map_err(TraceError::Io)?;
    Ok(())
}
