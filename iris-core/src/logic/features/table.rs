//! Feature Table - named-column matrix handed to classifiers
//!
//! Mirrors a single dataframe: each row is one record, each column one
//! named measurement. Classifiers check the column names against the names
//! their artifact was trained with before touching the values.

use ndarray::{Array2, Axis};

use super::record::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Build a table with the canonical columns from records
    pub fn from_records(records: &[FeatureRecord]) -> Self {
        let mut values = Array2::<f64>::zeros((records.len(), FEATURE_COUNT));
        for (mut row, record) in values.axis_iter_mut(Axis(0)).zip(records) {
            for (cell, v) in row.iter_mut().zip(record.values()) {
                *cell = v;
            }
        }

        Self {
            columns: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            values,
        }
    }

    /// Single-row table, the shape used per prediction request
    pub fn single(record: &FeatureRecord) -> Self {
        Self::from_records(std::slice::from_ref(record))
    }

    #[cfg(test)]
    pub(crate) fn with_columns(columns: Vec<String>, values: Array2<f64>) -> Self {
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }
}
