use serde::{Deserialize, Serialize};

use crate::logic::features::FeatureRecord;

/// One CSV row: four measurements plus the species label.
/// Only `species` is ever rewritten (by the poisoner).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: String,
}

impl DatasetRecord {
    pub fn features(&self) -> FeatureRecord {
        FeatureRecord::new(self.sepal_length, self.sepal_width, self.petal_length, self.petal_width)
    }
}
