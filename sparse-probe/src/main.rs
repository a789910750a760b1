//! Sparse probe - drives a sparse array over an in-memory source and prints
//! every load call, change notification and read.

mod report;
mod script;
mod source;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use sparse_array::config::{load_config, write_config};
use sparse_array::{Entry, SparseArray};
use tracing::{info, warn};

use crate::report::{ProbeEvent, ReadState, Reporter, ReportingObserver};
use crate::script::{ProbeScript, Step, load_script};
use crate::source::ProbeSource;

#[derive(Parser)]
#[command(name = "sparse-probe")]
#[command(about = "Drive a sparse array over an in-memory source and print its activity")]
struct Args {
    /// Number of items in the source
    #[arg(long, default_value = "100")]
    total: usize,

    /// Load window width (overrides --config)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Sparse array config file (TOML)
    #[arg(long, default_value = "sparse.toml")]
    config: PathBuf,

    /// Save the effective configuration to --config before running
    #[arg(long)]
    write_config: bool,

    /// Probe script (TOML); replaces --read
    #[arg(long)]
    script: Option<PathBuf>,

    /// Index to read, settling after each (repeatable)
    #[arg(long = "read")]
    reads: Vec<usize>,

    /// Simulated loader latency in milliseconds
    #[arg(long, default_value = "0")]
    latency_ms: u64,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    sparse_array::logging::init("sparse_probe=info");
    if let Err(err) = run(Args::parse()).await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => ProbeScript::from_reads(&args.reads),
    };

    let mut config = load_config(&args.config)?;
    if let Some(batch_size) = script.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if args.write_config {
        write_config(&args.config, &config)?;
        info!(path = %args.config.display(), "wrote config");
    }
    let total = script.total.unwrap_or(args.total);
    info!(total, batch_size = config.batch_size, steps = script.steps.len(), "starting probe");

    let reporter = Reporter::new(args.json);
    let source = ProbeSource::new(total, Duration::from_millis(args.latency_ms), reporter);
    let mut array =
        SparseArray::new(config, source.loader()).context("create sparse array")?;
    array.add_observer(Box::new(ReportingObserver::new(reporter)));

    settle(&mut array, reporter).await;
    for step in &script.steps {
        run_step(&mut array, &source, reporter, step).await;
    }
    if array.has_pending_loads() {
        settle(&mut array, reporter).await;
    }

    array.dispose();
    Ok(())
}

async fn run_step(
    array: &mut SparseArray<u64>,
    source: &ProbeSource,
    reporter: Reporter,
    step: &Step,
) {
    match step {
        Step::Read { index } => {
            let index = *index;
            let event = match array.object_at(index) {
                Entry::Loaded(value) => ProbeEvent::Read {
                    index,
                    value: Some(*value),
                    state: ReadState::Loaded,
                },
                Entry::Unloaded => ProbeEvent::Read {
                    index,
                    value: None,
                    state: ReadState::Unloaded,
                },
                Entry::OutOfBounds => ProbeEvent::Read {
                    index,
                    value: None,
                    state: ReadState::OutOfBounds,
                },
            };
            reporter.emit(&event);
        }
        Step::Settle => settle(array, reporter).await,
        Step::Push { count } => {
            source.push(*count);
            reporter.emit(&ProbeEvent::Source { len: source.len() });
        }
        Step::Truncate { len } => {
            source.truncate(*len);
            reporter.emit(&ProbeEvent::Source { len: source.len() });
        }
    }
}

/// Apply every in-flight load. Failures are reported by the observer and do
/// not stop the probe.
async fn settle(array: &mut SparseArray<u64>, reporter: Reporter) {
    while let Some(result) = array.complete_next().await {
        if let Err(err) = result {
            warn!(error = %err, "load failed");
        }
    }
    reporter.emit(&ProbeEvent::Settled {
        len: array.len(),
        loaded: array.loaded_count(),
        is_loaded: array.is_loaded(),
    });
}
