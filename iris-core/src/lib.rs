//! Iris Pipeline - Core Library
//!
//! Domain logic shared by the prediction server and the pipeline CLIs:
//! feature records, model artifacts, label poisoning, evaluation and plots.

pub mod constants;
pub mod logic;

pub use ndarray;

pub use logic::features::{FeatureRecord, FeatureTable, FEATURE_COUNT, FEATURE_NAMES};
pub use logic::model::{Classifier, InferenceError, ModelArtifact, ModelError, PredictionResult};
