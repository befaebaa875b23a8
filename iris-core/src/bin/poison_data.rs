//! Label Poisoner
//!
//! Flips a fraction of the dataset labels to a different random class.
//!
//! Usage:
//!   poison-data --level 0.1
//!   poison-data --level 0.05 --seed 7 --output data/iris_poisoned_5.csv

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use iris_core::constants::{DEFAULT_POISONED_DATA_PATH, DEFAULT_SOURCE_DATA_PATH};
use iris_core::logic::poison;

/// Poison the Iris dataset labels
#[derive(Parser, Debug)]
#[command(name = "poison-data")]
#[command(about = "Poison the Iris dataset labels")]
struct Args {
    /// The fraction of data to poison (e.g., 0.05 for 5%)
    #[arg(long, value_parser = poison::parse_level)]
    level: f64,

    /// Source dataset (never modified)
    #[arg(long, default_value = DEFAULT_SOURCE_DATA_PATH)]
    input: PathBuf,

    /// Where the poisoned dataset is written (must differ from --input)
    #[arg(long, default_value = DEFAULT_POISONED_DATA_PATH)]
    output: PathBuf,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("--- Starting Data Poisoning ---");
    let report = poison::poison_file(&args.input, &args.output, args.level, args.seed)
        .with_context(|| format!("failed to poison {}", args.input.display()))?;

    println!(
        "Poisoned {} of {} rows ({:.0}%); labels: {}",
        report.poisoned_count(),
        report.total_rows,
        report.level * 100.0,
        report.labels.join(", ")
    );
    println!("Poisoned data saved to {}", args.output.display());
    println!("--- Data Poisoning Complete ---");

    Ok(())
}
