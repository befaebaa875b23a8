//! Confusion matrix - true vs predicted label counts

use serde::Serialize;

use crate::logic::evaluation::ResultsBundle;

/// Rows are true labels, columns predicted labels; both axes use the
/// sorted distinct true labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfusionMatrix {
    pub labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
    /// Predictions whose label is not among the true labels
    pub dropped: usize,
}

impl ConfusionMatrix {
    pub fn from_bundle(bundle: &ResultsBundle) -> Self {
        let labels = bundle.true_labels();
        let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
        let mut dropped = 0;

        for (t, p) in bundle.y_true.iter().zip(&bundle.y_pred) {
            let row = labels.binary_search(t);
            let col = labels.binary_search(p);
            match (row, col) {
                (Ok(r), Ok(c)) => counts[r][c] += 1,
                _ => dropped += 1,
            }
        }

        if dropped > 0 {
            log::warn!("{} predictions use labels outside the true-label set and are not counted", dropped);
        }

        Self { labels, counts, dropped }
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts
            .get(actual)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> usize {
        (0..self.size()).map(|i| self.get(i, i)).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}
