//! Plots Module - charts from a saved results bundle
//!
//! Two PNGs per poison level: a confusion matrix and an accuracy bar.
//! A missing results bundle is not an error; the run is skipped.

pub mod confusion;
pub mod font;
pub mod render;


use std::fs;
use std::path::{Path, PathBuf};

use crate::logic::evaluation::{EvaluationError, ResultsBundle};

pub use confusion::ConfusionMatrix;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("results bundle contains no labels")]
    EmptyResults,

    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error(transparent)]
    Results(#[from] EvaluationError),
}

/// Paths of the written charts
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOutputs {
    pub confusion_matrix: PathBuf,
    pub accuracy_chart: PathBuf,
}

pub fn confusion_matrix_path(output_dir: &Path, poison_level: i64) -> PathBuf {
    output_dir.join(format!("confusion_matrix_{}.png", poison_level))
}

pub fn accuracy_chart_path(output_dir: &Path, poison_level: i64) -> PathBuf {
    output_dir.join(format!("accuracy_chart_{}.png", poison_level))
}

/// Render both charts for `poison_level` (a percentage).
/// Returns `Ok(None)` when `results_path` does not exist.
pub fn generate_plots(
    poison_level: i64,
    results_path: &Path,
    output_dir: &Path,
) -> Result<Option<PlotOutputs>, PlotError> {
    let bundle = match ResultsBundle::load(results_path) {
        Ok(bundle) => bundle,
        Err(EvaluationError::NotFound { path, .. }) => {
            log::warn!("{} not found. Skipping plot generation.", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    render_bundle(&bundle, poison_level, output_dir).map(Some)
}

/// Render both charts for an already loaded bundle
pub fn render_bundle(
    bundle: &ResultsBundle,
    poison_level: i64,
    output_dir: &Path,
) -> Result<PlotOutputs, PlotError> {
    if bundle.y_true.is_empty() {
        return Err(PlotError::EmptyResults);
    }

    fs::create_dir_all(output_dir).map_err(|source| PlotError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let font = font::ensure_font()?;
    log::debug!("Chart font: {:?}", font);

    let matrix = ConfusionMatrix::from_bundle(bundle);
    let confusion_matrix = confusion_matrix_path(output_dir, poison_level);
    render::draw_confusion_matrix(
        &confusion_matrix,
        &matrix,
        &format!("Confusion Matrix (Poison Level: {}%)", poison_level),
    )?;
    log::info!(
        "Confusion matrix saved to {} ({}/{} correct)",
        confusion_matrix.display(),
        matrix.correct(),
        matrix.total()
    );

    let accuracy_chart = accuracy_chart_path(output_dir, poison_level);
    render::draw_accuracy_chart(
        &accuracy_chart,
        bundle.accuracy,
        &format!("Model Accuracy (Poison Level: {}%)", poison_level),
    )?;
    log::info!("Accuracy chart saved to {}", accuracy_chart.display());

    Ok(PlotOutputs {
        confusion_matrix,
        accuracy_chart,
    })
}
