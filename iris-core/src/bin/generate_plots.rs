//! Plot Generator
//!
//! Renders a confusion matrix and an accuracy chart from `test_results.json`.
//!
//! Usage:
//!   generate-plots --poison-level 5

use std::path::PathBuf;

use clap::Parser;

use iris_core::constants::{DEFAULT_PLOTS_DIR, DEFAULT_RESULTS_PATH};
use iris_core::logic::plots;

/// Generate plots from test results
#[derive(Parser, Debug)]
#[command(name = "generate-plots")]
#[command(about = "Generate plots from test results")]
struct Args {
    /// The integer poison level percentage (e.g., 5)
    #[arg(long)]
    poison_level: i64,

    /// Results bundle written by the evaluator
    #[arg(long, default_value = DEFAULT_RESULTS_PATH)]
    results: PathBuf,

    /// Directory for the PNG files
    #[arg(long, default_value = DEFAULT_PLOTS_DIR)]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match plots::generate_plots(args.poison_level, &args.results, &args.output_dir)? {
        Some(outputs) => {
            println!("Confusion matrix saved to {}", outputs.confusion_matrix.display());
            println!("Accuracy chart saved to {}", outputs.accuracy_chart.display());
        }
        None => {
            println!(
                "Warning: {} not found. Skipping plot generation.",
                args.results.display()
            );
        }
    }

    Ok(())
}
