//! Results Bundle - captured labels from one test run

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::EvaluationError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultsBundle {
    pub y_true: Vec<String>,
    pub y_pred: Vec<String>,
    pub accuracy: f64,
}

impl ResultsBundle {
    /// Build from parallel label sequences, computing the accuracy
    pub fn new(y_true: Vec<String>, y_pred: Vec<String>) -> Result<Self, EvaluationError> {
        let accuracy = super::accuracy(&y_true, &y_pred)?;
        Ok(Self { y_true, y_pred, accuracy })
    }

    /// Read a bundle. A missing file is `EvaluationError::NotFound`.
    pub fn load(path: &Path) -> Result<Self, EvaluationError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                EvaluationError::NotFound {
                    kind: "results bundle",
                    path: path.to_path_buf(),
                }
            } else {
                EvaluationError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let bundle: Self = serde_json::from_str(&text)?;
        if bundle.y_true.len() != bundle.y_pred.len() {
            return Err(EvaluationError::LengthMismatch {
                y_true: bundle.y_true.len(),
                y_pred: bundle.y_pred.len(),
            });
        }
        Ok(bundle)
    }

    pub fn save(&self, path: &Path) -> Result<(), EvaluationError> {
        let io_err = |source| EvaluationError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)?;
        log::debug!("Results bundle saved to {}", path.display());
        Ok(())
    }

    /// Sorted distinct true labels (the confusion matrix axes)
    pub fn true_labels(&self) -> Vec<String> {
        let mut labels = self.y_true.clone();
        labels.sort();
        labels.dedup();
        labels
    }
}
