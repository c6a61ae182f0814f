use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use memmap2::Mmap;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stationagg::{Executor, Options};

#[derive(Debug, Parser)]
#[command(version, about = "Min/mean/max per station of a measurements file")]
struct Args {
    /// File of `<station>;<value>` lines.
    #[arg(default_value = "measurements.txt")]
    path: PathBuf,

    /// Number of chunks (and worker threads). Defaults to the CPU count.
    #[arg(short, long, env = "STATIONAGG_WORKERS")]
    workers: Option<usize>,

    #[arg(long, value_enum, default_value_t = ExecutorArg::Rayon)]
    executor: ExecutorArg,

    /// Use the validating line-by-line aggregator instead of the table path.
    #[arg(long)]
    reference: bool,

    /// More log output on stderr; repeat for more. RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExecutorArg {
    Serial,
    Rayon,
    Threads,
}

impl From<ExecutorArg> for Executor {
    fn from(arg: ExecutorArg) -> Self {
        match arg {
            ExecutorArg::Serial => Executor::Serial,
            ExecutorArg::Rayon => Executor::Rayon,
            ExecutorArg::Threads => Executor::Threads,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut options = Options::default().with_executor(args.executor.into());
    if let Some(workers) = args.workers {
        options = options.with_workers(workers);
    }
    debug!(?options, path = %args.path.display(), "starting");

    let file = File::open(&args.path)
        .with_context(|| format!("couldn't open {}", args.path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("couldn't stat {}", args.path.display()))?
        .len();

    // Zero-length files can't be mapped.
    let mmap = if len == 0 {
        None
    } else {
        // SAFETY: the file is opened read-only and is assumed not to be
        // truncated or modified while mapped.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("couldn't map {}", args.path.display()))?;
        Some(map)
    };
    let data: &[u8] = mmap.as_deref().unwrap_or(&[]);

    let started = Instant::now();
    let summary = if args.reference {
        stationagg::reference::aggregate(data)?
    } else {
        stationagg::aggregate(data, &options)?.into_summary()
    };
    info!(
        stations = summary.len(),
        bytes = data.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "aggregated"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    summary
        .write_to(&mut out)
        .and_then(|()| out.flush())
        .context("error writing stdout")?;
    Ok(())
}
