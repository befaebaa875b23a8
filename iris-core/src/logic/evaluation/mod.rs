//! Evaluation Module - test runs, metrics and the quality gate
//!
//! `evaluate` runs a classifier over a labeled dataset and produces the
//! results bundle consumed by the plot generator plus the `accuracy:` metrics
//! file consumed by the quality gate.

pub mod metrics;
pub mod results;


use std::path::{Path, PathBuf};

use crate::logic::dataset::{self, DatasetError, DatasetRecord};
use crate::logic::features::{FeatureRecord, FeatureTable};
use crate::logic::model::{AccuracyThreshold, Classifier, InferenceError, ModelArtifact, ModelError};

pub use metrics::{parse_metrics, read_metrics, write_metrics};
pub use results::ResultsBundle;

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("{kind} not found at {path}")]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed results bundle: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not parse accuracy from metrics file, content was: '{0}'")]
    MalformedMetrics(String),

    #[error("y_true has {y_true} labels but y_pred has {y_pred}")]
    LengthMismatch { y_true: usize, y_pred: usize },

    #[error("cannot evaluate an empty dataset")]
    EmptyDataset,

    #[error("model accuracy {accuracy} is {shortfall:.4} below the {threshold} threshold")]
    BelowThreshold {
        accuracy: f64,
        threshold: f64,
        shortfall: f64,
    },

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Fraction of positions where the labels agree
pub fn accuracy(y_true: &[String], y_pred: &[String]) -> Result<f64, EvaluationError> {
    if y_true.len() != y_pred.len() {
        return Err(EvaluationError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(EvaluationError::EmptyDataset);
    }

    let hits = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(hits as f64 / y_true.len() as f64)
}

/// Predict every record in one table and score against its labels
pub fn evaluate(model: &dyn Classifier, records: &[DatasetRecord]) -> Result<ResultsBundle, EvaluationError> {
    if records.is_empty() {
        return Err(EvaluationError::EmptyDataset);
    }

    let features: Vec<FeatureRecord> = records.iter().map(DatasetRecord::features).collect();
    let table = FeatureTable::from_records(&features);

    let y_pred = model.predict(&table)?;
    let y_true: Vec<String> = records.iter().map(|r| r.species.clone()).collect();

    ResultsBundle::new(y_true, y_pred)
}

/// Model file + dataset file in, results bundle + metrics file out
pub fn evaluate_files(
    model_path: &Path,
    data_path: &Path,
    results_path: &Path,
    metrics_path: &Path,
) -> Result<ResultsBundle, EvaluationError> {
    let model = ModelArtifact::load(model_path)?;
    let records = dataset::read_dataset(data_path)?;

    let bundle = evaluate(&model, &records)?;
    log::info!(
        "Evaluated {} rows with {}: accuracy {:.4}",
        records.len(),
        model.describe(),
        bundle.accuracy
    );

    bundle.save(results_path)?;
    write_metrics(metrics_path, bundle.accuracy)?;

    Ok(bundle)
}

/// Outcome of a passing quality gate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityReport {
    pub accuracy: f64,
    pub threshold: f64,
}

/// Both artifacts must exist and the recorded accuracy must reach the threshold
pub fn check_quality(
    model_path: &Path,
    metrics_path: &Path,
    threshold: AccuracyThreshold,
) -> Result<QualityReport, EvaluationError> {
    if !model_path.exists() {
        return Err(EvaluationError::NotFound {
            kind: "model artifact",
            path: model_path.to_path_buf(),
        });
    }

    let accuracy = read_metrics(metrics_path)?;
    log::info!("Found accuracy from metrics file: {}", accuracy);

    if !threshold.passes(accuracy) {
        return Err(EvaluationError::BelowThreshold {
            accuracy,
            threshold: threshold.min_accuracy,
            shortfall: threshold.shortfall(accuracy),
        });
    }

    Ok(QualityReport {
        accuracy,
        threshold: threshold.min_accuracy,
    })
}
