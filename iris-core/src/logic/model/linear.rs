//! Logistic regression exported from a linear trainer
//!
//! Multinomial models carry one coefficient row per class and use softmax.
//! Two-class models may carry a single row (the positive class is
//! `classes[1]`) and use the logistic sigmoid.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::artifact::{validate_classes, validate_feature_names, validate_matrix, ModelError};
use super::inference::{check_columns, softmax_rows, Classifier, InferenceError};
use crate::logic::features::FeatureTable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    /// One row per class (or a single row for binary models)
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    pub fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coefficients.len() == 1
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_feature_names(&self.feature_names)?;
        validate_classes(&self.classes)?;

        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        validate_matrix("coefficients", &self.coefficients, expected_rows, self.feature_names.len())?;

        if self.intercepts.len() != expected_rows {
            return Err(ModelError::Invalid(format!(
                "intercepts has {} entries, expected {}",
                self.intercepts.len(),
                expected_rows
            )));
        }
        if self.intercepts.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::Invalid("intercepts contain non-finite values".to_string()));
        }
        Ok(())
    }

    fn weights(&self) -> Result<Array2<f64>, InferenceError> {
        let rows = self.coefficients.len();
        let cols = self.feature_names.len();
        let flat: Vec<f64> = self.coefficients.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| InferenceError::Backend(format!("coefficient shape: {}", e)))
    }

    fn decision_function(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        check_columns(&self.feature_names, table)?;
        let weights = self.weights()?;
        let intercepts = Array1::from_vec(self.intercepts.clone());
        Ok(table.values().dot(&weights.t()) + &intercepts)
    }
}

impl Classifier for LogisticRegression {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        let scores = self.decision_function(table)?;

        if self.is_binary() {
            let mut proba = Array2::<f64>::zeros((scores.nrows(), 2));
            for (i, &z) in scores.column(0).iter().enumerate() {
                let positive = 1.0 / (1.0 + (-z).exp());
                proba[[i, 0]] = 1.0 - positive;
                proba[[i, 1]] = positive;
            }
            return Ok(proba);
        }

        Ok(softmax_rows(scores))
    }

    fn describe(&self) -> String {
        let kind = if self.is_binary() { "binary" } else { "multinomial" };
        format!("logistic_regression ({}, {} classes)", kind, self.classes.len())
    }
}
