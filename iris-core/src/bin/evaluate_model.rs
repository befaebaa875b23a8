//! Model Evaluator
//!
//! Runs the model artifact over a labeled dataset and records the results
//! bundle and metrics file used by `generate-plots` and `check-quality`.

use std::path::PathBuf;

use clap::Parser;

use iris_core::constants::{
    DEFAULT_METRICS_PATH, DEFAULT_MODEL_PATH, DEFAULT_RESULTS_PATH, DEFAULT_SOURCE_DATA_PATH,
};
use iris_core::logic::evaluation;

/// Evaluate a model artifact against a labeled dataset
#[derive(Parser, Debug)]
#[command(name = "evaluate-model")]
#[command(about = "Evaluate a model artifact against a labeled dataset")]
struct Args {
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(long, default_value = DEFAULT_SOURCE_DATA_PATH)]
    data: PathBuf,

    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    results: PathBuf,

    #[arg(long, default_value = DEFAULT_METRICS_PATH)]
    metrics: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let bundle = evaluation::evaluate_files(&args.model, &args.data, &args.results, &args.metrics)?;

    println!("accuracy: {}", bundle.accuracy);
    println!("Results saved to {}", args.results.display());
    println!("Metrics saved to {}", args.metrics.display());

    Ok(())
}
