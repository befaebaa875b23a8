//! Model Artifact - JSON-exported trained classifier
//!
//! Loaded once, validated, then only read. The `model_type` tag selects the
//! estimator family.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::inference::{Classifier, InferenceError};
use super::linear::LogisticRegression;
use super::naive_bayes::GaussianNb;
use crate::logic::features::{FeatureTable, FEATURE_NAMES};

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),
}

// ============================================================================
// ARTIFACT
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "model_type", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LogisticRegression),
    GaussianNb(GaussianNb),
}

impl ModelArtifact {
    /// Load and validate an artifact from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        log::info!("Loading model from: {}", path.display());

        if !path.exists() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::from_json(&text)?;

        log::info!("Model loaded: {}", artifact.describe());
        Ok(artifact)
    }

    /// Parse and validate an artifact from its JSON text
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: Self = serde_json::from_str(text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            Self::LogisticRegression(m) => m.validate(),
            Self::GaussianNb(m) => m.validate(),
        }
    }

    pub fn model_type(&self) -> &'static str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::GaussianNb(_) => "gaussian_nb",
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            Self::LogisticRegression(m) => m as &dyn Classifier,
            Self::GaussianNb(m) => m as &dyn Classifier,
        }
    }
}

impl Classifier for ModelArtifact {
    fn classes(&self) -> &[String] {
        self.inner().classes()
    }

    fn predict_proba(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        self.inner().predict_proba(table)
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

pub(crate) fn validate_feature_names(names: &[String]) -> Result<(), ModelError> {
    if names.len() != FEATURE_NAMES.len() || names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b) {
        return Err(ModelError::Invalid(format!(
            "feature_names must be {:?}, got {:?}",
            FEATURE_NAMES, names
        )));
    }
    Ok(())
}

pub(crate) fn validate_classes(classes: &[String]) -> Result<(), ModelError> {
    if classes.len() < 2 {
        return Err(ModelError::Invalid(format!(
            "at least two classes required, got {}",
            classes.len()
        )));
    }
    for (i, class) in classes.iter().enumerate() {
        if classes[..i].contains(class) {
            return Err(ModelError::Invalid(format!("duplicate class label '{}'", class)));
        }
    }
    Ok(())
}

pub(crate) fn validate_matrix(
    name: &str,
    matrix: &[Vec<f64>],
    rows: usize,
    cols: usize,
) -> Result<(), ModelError> {
    if matrix.len() != rows {
        return Err(ModelError::Invalid(format!(
            "{} has {} rows, expected {}",
            name,
            matrix.len(),
            rows
        )));
    }
    if let Some(row) = matrix.iter().find(|r| r.len() != cols) {
        return Err(ModelError::Invalid(format!(
            "{} row has {} values, expected {}",
            name,
            row.len(),
            cols
        )));
    }
    if matrix.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ModelError::Invalid(format!("{} contains non-finite values", name)));
    }
    Ok(())
}
