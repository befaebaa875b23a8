//! Quality Gate
//!
//! Fails (non-zero exit) unless the model artifact and metrics file exist
//! and the recorded accuracy is at least the threshold.

use std::path::PathBuf;

use clap::Parser;

use iris_core::constants::{DEFAULT_ACCURACY_THRESHOLD, DEFAULT_METRICS_PATH, DEFAULT_MODEL_PATH};
use iris_core::logic::evaluation;
use iris_core::logic::model::AccuracyThreshold;

/// Check a trained model against the accuracy threshold
#[derive(Parser, Debug)]
#[command(name = "check-quality")]
#[command(about = "Check a trained model against the accuracy threshold")]
struct Args {
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model: PathBuf,

    #[arg(long, default_value = DEFAULT_METRICS_PATH)]
    metrics: PathBuf,

    /// Minimum accuracy (inclusive)
    #[arg(long, default_value_t = DEFAULT_ACCURACY_THRESHOLD, value_parser = parse_threshold)]
    threshold: f64,
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    AccuracyThreshold::new(value)
        .map(|t| t.min_accuracy)
        .ok_or_else(|| format!("threshold must be between 0 and 1, got {}", value))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let threshold = AccuracyThreshold::new(args.threshold).unwrap_or_default();

    let report = evaluation::check_quality(&args.model, &args.metrics, threshold)?;
    println!(
        "PASS: accuracy {} meets the {} threshold",
        report.accuracy, report.threshold
    );

    Ok(())
}
