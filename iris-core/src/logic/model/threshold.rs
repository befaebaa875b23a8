//! Accuracy Threshold - quality gate for trained models
//!
//! A model passes when its accuracy is at least the minimum (`>=`).

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_ACCURACY_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyThreshold {
    /// Minimum accepted accuracy (0.0 - 1.0)
    pub min_accuracy: f64,
}

impl Default for AccuracyThreshold {
    fn default() -> Self {
        Self {
            min_accuracy: DEFAULT_ACCURACY_THRESHOLD,
        }
    }
}

impl AccuracyThreshold {
    /// `None` unless `min_accuracy` lies in [0, 1]
    pub fn new(min_accuracy: f64) -> Option<Self> {
        (0.0..=1.0)
            .contains(&min_accuracy)
            .then_some(Self { min_accuracy })
    }

    pub fn passes(&self, accuracy: f64) -> bool {
        accuracy >= self.min_accuracy
    }

    /// How far below the threshold `accuracy` falls (0 when passing)
    pub fn shortfall(&self, accuracy: f64) -> f64 {
        (self.min_accuracy - accuracy).max(0.0)
    }
}
