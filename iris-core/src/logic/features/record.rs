//! Feature Record - one set of Iris measurements

use serde::{Deserialize, Serialize};

/// Number of measurements per flower
pub const FEATURE_COUNT: usize = 4;

/// Canonical column order. Model artifacts must declare exactly these names.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
];

/// Four named measurements (cm). No range validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl FeatureRecord {
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self { sepal_length, sepal_width, petal_length, petal_width }
    }

    /// Values in `FEATURE_NAMES` order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [self.sepal_length, self.sepal_width, self.petal_length, self.petal_width]
    }

    /// JSON form for log/span annotation
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "sepal_length": self.sepal_length,
            "sepal_width": self.sepal_width,
            "petal_length": self.petal_length,
            "petal_width": self.petal_width,
        })
    }
}
