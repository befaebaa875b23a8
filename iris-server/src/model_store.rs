//! Model store - loads the classifier once at startup

use std::path::Path;
use std::sync::Arc;

use iris_core::{Classifier, ModelArtifact, ModelError};

/// Shared, read-only classifier handle
pub type SharedClassifier = Arc<dyn Classifier>;

/// Load the model artifact. Failure here is fatal for the server.
pub fn load_classifier(path: &Path) -> Result<SharedClassifier, ModelError> {
    let artifact = ModelArtifact::load(path)?;
    tracing::info!(
        model_type = artifact.model_type(),
        classes = ?artifact.classes(),
        "Model ready"
    );
    Ok(Arc::new(artifact))
}
