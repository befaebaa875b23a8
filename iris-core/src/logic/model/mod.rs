//! Model Module - Classifier artifacts and inference
//!
//! The service and the evaluator only see the `Classifier` trait.
//! `ModelArtifact` is the JSON-exported trained model that implements it.

pub mod inference;
pub mod artifact;
pub mod linear;
pub mod naive_bayes;
pub mod threshold;

#[cfg(test)]
mod tests;

// Re-export common types
pub use inference::{predict_record, Classifier, InferenceError, PredictionResult};
pub use artifact::{ModelArtifact, ModelError};
pub use linear::LogisticRegression;
pub use naive_bayes::GaussianNb;
pub use threshold::AccuracyThreshold;
