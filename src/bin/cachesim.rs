//! Command-line front end for the trace replay simulator.
//!
//! ```text
//! cachesim marc traces/Financial1.csv 1000 2000 4000
//! cachesim arc traces/web.csv 512 --format json --output arc.json
//! ```
//!
//! Log verbosity comes from `CACHESIM_LOG` (falling back to `RUST_LOG`),
//! e.g. `CACHESIM_LOG=cachesim=debug` to see regime changes.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cachesim::builder::PolicyKind;
use cachesim::error::SimError;
use cachesim::sim::{OutputFormat, Simulator, write_reports};
use cachesim::trace::load_trace;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Replay a block trace against a cache replacement policy",
    long_about = "Replay a block trace against a cache replacement policy at one or more cache sizes.\n\nAlgorithms: lru, lfu, arc, larc, marc.\nTrace lines are `address,operation`; blank lines and lines starting with # are skipped."
)]
struct Cli {
    /// Replacement policy: lru, lfu, arc, larc or marc.
    algorithm: PolicyKind,

    /// Trace file to replay.
    trace: PathBuf,

    /// Cache sizes (in blocks) to simulate, one run each.
    #[arg(required = true, num_args = 1..)]
    sizes: Vec<usize>,

    /// Report format: text or json.
    #[arg(long, env = "CACHESIM_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Write reports here instead of stdout.
    #[arg(short, long, env = "CACHESIM_OUTPUT")]
    output: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CACHESIM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), SimError> {
    let simulator = Simulator::new(cli.algorithm, cli.sizes)?;
    let trace = load_trace(&cli.trace)?;
    tracing::info!(
        algorithm = %cli.algorithm,
        trace = %cli.trace.display(),
        accesses = trace.len(),
        sizes = ?simulator.sizes(),
        "starting simulation"
    );

    let reports = simulator.run(&trace)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)?;
            write_reports(&reports, cli.format, BufWriter::new(file))?;
            tracing::info!(path = %path.display(), "reports written");
        },
        None => write_reports(&reports, cli.format, io::stdout().lock())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "simulation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}
