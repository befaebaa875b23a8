//! Gaussian naive Bayes exported from a probabilistic trainer

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::artifact::{validate_classes, validate_feature_names, validate_matrix, ModelError};
use super::inference::{check_columns, softmax_rows, Classifier, InferenceError};
use crate::logic::features::FeatureTable;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaussianNb {
    pub feature_names: Vec<String>,
    pub classes: Vec<String>,
    pub class_prior: Vec<f64>,
    /// Per-class feature means
    pub theta: Vec<Vec<f64>>,
    /// Per-class feature variances (strictly positive)
    pub var: Vec<Vec<f64>>,
}

impl GaussianNb {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_feature_names(&self.feature_names)?;
        validate_classes(&self.classes)?;

        let k = self.classes.len();
        let n = self.feature_names.len();
        validate_matrix("theta", &self.theta, k, n)?;
        validate_matrix("var", &self.var, k, n)?;

        if self.var.iter().flatten().any(|v| *v <= 0.0) {
            return Err(ModelError::Invalid("var must be strictly positive".to_string()));
        }
        if self.class_prior.len() != k {
            return Err(ModelError::Invalid(format!(
                "class_prior has {} entries, expected {}",
                self.class_prior.len(),
                k
            )));
        }
        if self.class_prior.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(ModelError::Invalid("class_prior must be positive".to_string()));
        }
        Ok(())
    }

    fn joint_log_likelihood(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        check_columns(&self.feature_names, table)?;

        let values = table.values();
        let mut jll = Array2::<f64>::zeros((values.nrows(), self.classes.len()));

        for (c, ((prior, means), vars)) in self
            .class_prior
            .iter()
            .zip(&self.theta)
            .zip(&self.var)
            .enumerate()
        {
            let norm: f64 = vars
                .iter()
                .map(|v| (2.0 * std::f64::consts::PI * v).ln())
                .sum::<f64>()
                * -0.5;

            for (r, row) in values.rows().into_iter().enumerate() {
                let dist: f64 = row
                    .iter()
                    .zip(means.iter().zip(vars))
                    .map(|(x, (mu, v))| (x - mu).powi(2) / v)
                    .sum();
                jll[[r, c]] = prior.ln() + norm - 0.5 * dist;
            }
        }

        Ok(jll)
    }
}

impl Classifier for GaussianNb {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_proba(&self, table: &FeatureTable) -> Result<Array2<f64>, InferenceError> {
        Ok(softmax_rows(self.joint_log_likelihood(table)?))
    }

    fn describe(&self) -> String {
        format!("gaussian_nb ({} classes)", self.classes.len())
    }
}
