//! Dataset Module - labeled Iris CSV files
//!
//! Reads and writes the `sepal_length,sepal_width,petal_length,petal_width,species`
//! layout used by the training data and its poisoned copies.

pub mod record;
pub mod writer;


use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub use record::DatasetRecord;
pub use writer::{write_dataset, DatasetWriter};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to flush dataset: {0}")]
    Flush(std::io::Error),

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Read a labeled dataset from disk
pub fn read_dataset(path: &Path) -> Result<Vec<DatasetRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_from(file)?;
    log::debug!("Read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Read a labeled dataset from any reader (header row required)
pub fn read_from<R: Read>(reader: R) -> Result<Vec<DatasetRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Distinct labels in first-appearance order
pub fn label_set(records: &[DatasetRecord]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for record in records {
        if !labels.iter().any(|l| l == &record.species) {
            labels.push(record.species.clone());
        }
    }
    labels
}
