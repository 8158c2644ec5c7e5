//! vibe-features - Main Entry Point

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use data_validator::SampleReader;
use pipeline::{init_logging, ExportFormat, Pipeline, PipelineConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "vibe-features")]
#[command(about = "Segment a raw vibration recording and export its feature dataset")]
#[command(version)]
struct Args {
    /// Recording with one acceleration sample per row
    #[arg(short, long)]
    input: PathBuf,

    /// Destination for the dataset
    #[arg(short, long)]
    output: PathBuf,

    /// Output encoding: csv, json or postcard
    #[arg(short, long, default_value = "csv")]
    format: ExportFormat,

    /// TOML configuration file
    #[arg(short, long, env = "VIBE_CONFIG")]
    config: Option<PathBuf>,

    /// Extraction threads (0 = one per core); overrides the config file
    #[arg(short, long)]
    workers: Option<usize>,

    /// Keep only training-eligible (real normal) rows
    #[arg(long)]
    training_only: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging("info", args.json_logs).map_err(|e| anyhow!(e))?;

    info!("=== vibe-features v{} ===", env!("CARGO_PKG_VERSION"));

    let mut config = PipelineConfig::load(args.config.as_deref())?;
    if let Some(workers) = args.workers {
        config.workers = workers;
    }

    let pipeline = Pipeline::new(&config)?;

    let samples = SampleReader::new(config.input_column.as_str())
        .read_path(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let validation = pipeline.validate(&samples);
    if !validation.valid {
        for err in &validation.errors {
            error!("{}", err);
        }
        bail!(
            "{} of {} samples failed validation",
            validation.invalid_count,
            validation.samples_checked
        );
    }

    let mut dataset = pipeline.run(&samples)?;
    if args.training_only {
        dataset = dataset.training_subset();
        info!("Kept {} training rows", dataset.len());
    }

    for (label, count) in dataset.label_counts() {
        info!("  {:<14} {}", label.as_str(), count);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    dataset.export(args.format, BufWriter::new(file))?;

    info!(
        "Wrote {} rows as {} to {}",
        dataset.len(),
        args.format,
        args.output.display()
    );
    Ok(())
}
