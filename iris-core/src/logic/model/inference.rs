//! Inference - the classifier capability set
//!
//! A classifier knows its class labels, estimates per-class probabilities
//! for every row of a feature table, and picks the most likely label.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureRecord, FeatureTable};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("feature columns {actual:?} do not match model features {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("model returned {probabilities} probability columns for {classes} classes")]
    ShapeMismatch { classes: usize, probabilities: usize },

    #[error("model returned an invalid probability: {0}")]
    InvalidProbability(f64),

    #[error("model returned {0} rows for a single-row table")]
    RowCount(usize),

    #[error("inference failed: {0}")]
    Backend(String),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_species: String,
    /// Probability per known class label
    pub confidence_scores: BTreeMap<String, f64>,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for trained classifiers (JSON artifacts, test stubs, ...)
pub trait Classifier: Send + Sync {
    /// Known class labels, in probability-column order
    fn classes(&self) -> &[String];

    /// One probability row per table row, one column per class
    fn predict_proba(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError>;

    /// Most likely label per table row
    fn predict(&self, table: &FeatureTable) -> Result<Vec<String>, InferenceError> {
        let proba = self.predict_proba(table)?;
        let classes = self.classes();
        if proba.ncols() != classes.len() {
            return Err(InferenceError::ShapeMismatch {
                classes: classes.len(),
                probabilities: proba.ncols(),
            });
        }

        proba
            .rows()
            .into_iter()
            .map(|row| argmax(row).map(|i| classes[i].clone()))
            .collect()
    }

    /// Short human-readable name for logs
    fn describe(&self) -> String {
        format!("classifier ({} classes)", self.classes().len())
    }
}

/// Index of the largest value; ties go to the first
pub(crate) fn argmax(row: ArrayView1<'_, f64>) -> Result<usize, InferenceError> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in row.iter().enumerate() {
        if !p.is_finite() {
            return Err(InferenceError::InvalidProbability(p));
        }
        match best {
            Some((_, b)) if p <= b => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
        .ok_or(InferenceError::ShapeMismatch { classes: 0, probabilities: 0 })
}

/// Check a table's columns against the names a model was trained with
pub(crate) fn check_columns(expected: &[String], table: &FeatureTable) -> Result<(), InferenceError> {
    if expected != table.columns() {
        return Err(InferenceError::FeatureMismatch {
            expected: expected.to_vec(),
            actual: table.columns().to_vec(),
        });
    }
    Ok(())
}

// ============================================================================
// PREDICTION
// ============================================================================

/// Classify one record: single-row table, `predict` + `predict_proba`,
/// then zip the class labels with the probability row.
pub fn predict_record(
    model: &dyn Classifier,
    record: &FeatureRecord,
) -> Result<PredictionResult, InferenceError> {
    let table = FeatureTable::single(record);

    let labels = model.predict(&table)?;
    let proba = model.predict_proba(&table)?;

    if labels.len() != 1 {
        return Err(InferenceError::RowCount(labels.len()));
    }
    if proba.nrows() != 1 {
        return Err(InferenceError::RowCount(proba.nrows()));
    }

    let classes = model.classes();
    if proba.ncols() != classes.len() {
        return Err(InferenceError::ShapeMismatch {
            classes: classes.len(),
            probabilities: proba.ncols(),
        });
    }

    let mut confidence_scores = BTreeMap::new();
    for (class, &p) in classes.iter().zip(proba.row(0).iter()) {
        if !(0.0..=1.0).contains(&p) {
            return Err(InferenceError::InvalidProbability(p));
        }
        confidence_scores.insert(class.clone(), p);
    }

    let predicted_species = labels.into_iter().next().unwrap_or_default();

    Ok(PredictionResult {
        predicted_species,
        confidence_scores,
    })
}

/// Row-wise softmax, shifted by the row max for stability
pub(crate) fn softmax_rows(mut scores: Array2<f64>) -> Array2<f64> {
    for mut row in scores.rows_mut() {
        let max = row.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    scores
}
