//! Poison Module - label flipping for robustness experiments
//!
//! Picks exactly `floor(N * level)` rows without replacement and gives each
//! a label drawn uniformly from the other labels of the dataset. Features
//! are never touched and the source file is never written.

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::logic::dataset::{self, DatasetError, DatasetRecord};

#[derive(Debug, thiserror::Error)]
pub enum PoisonError {
    #[error("poison level must be between 0 and 1, got {0}")]
    InvalidLevel(f64),

    #[error("poison level must be a number, got {0:?}")]
    UnparsableLevel(String),

    #[error("output {0} is the source dataset; refusing to overwrite it")]
    SameFile(PathBuf),

    #[error("cannot poison {rows} rows: dataset has {labels} distinct label(s), at least 2 required")]
    NotEnoughLabels { labels: usize, rows: usize },

    #[error(transparent)]
    Dataset(#[from] DatasetError),
}

/// Outcome of a poisoning run
#[derive(Debug, Clone, Serialize)]
pub struct PoisonReport {
    pub level: f64,
    pub total_rows: usize,
    /// Indices of relabeled rows, ascending
    pub poisoned_rows: Vec<usize>,
    /// Label set in first-appearance order
    pub labels: Vec<String>,
}

impl PoisonReport {
    pub fn poisoned_count(&self) -> usize {
        self.poisoned_rows.len()
    }
}

/// Reject levels outside [0, 1] (and NaN)
pub fn validate_level(level: f64) -> Result<(), PoisonError> {
    if !(0.0..=1.0).contains(&level) {
        return Err(PoisonError::InvalidLevel(level));
    }
    Ok(())
}

/// Parse a command-line poison level
pub fn parse_level(s: &str) -> Result<f64, PoisonError> {
    let level: f64 = s
        .trim()
        .parse()
        .map_err(|_| PoisonError::UnparsableLevel(s.to_string()))?;
    validate_level(level)?;
    Ok(level)
}

/// True when both paths name the same file on disk
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Number of rows relabeled for a dataset of `total` rows
pub fn rows_to_poison(total: usize, level: f64) -> usize {
    ((total as f64) * level).floor() as usize
}

/// Relabel rows of `records` in place
pub fn poison_records<R: Rng + ?Sized>(
    records: &mut [DatasetRecord],
    level: f64,
    rng: &mut R,
) -> Result<PoisonReport, PoisonError> {
    validate_level(level)?;

    let labels = dataset::label_set(records);
    let count = rows_to_poison(records.len(), level);

    if count > 0 && labels.len() < 2 {
        return Err(PoisonError::NotEnoughLabels {
            labels: labels.len(),
            rows: count,
        });
    }

    let mut poisoned_rows = index::sample(rng, records.len(), count).into_vec();
    poisoned_rows.sort_unstable();

    for &idx in &poisoned_rows {
        let record = &mut records[idx];
        let others: Vec<&String> = labels.iter().filter(|l| **l != record.species).collect();
        if let Some(new_label) = others.choose(rng) {
            log::trace!("Row {}: {} -> {}", idx, record.species, new_label);
            record.species = (*new_label).clone();
        }
    }

    Ok(PoisonReport {
        level,
        total_rows: records.len(),
        poisoned_rows,
        labels,
    })
}

/// Read `source`, poison it, write the result to `dest`.
/// With a seed the run is reproducible; otherwise the thread RNG is used.
/// `dest` may not be `source`.
pub fn poison_file(
    source: &Path,
    dest: &Path,
    level: f64,
    seed: Option<u64>,
) -> Result<PoisonReport, PoisonError> {
    validate_level(level)?;
    if same_file(source, dest) {
        return Err(PoisonError::SameFile(dest.to_path_buf()));
    }

    log::info!("Loading original data from {}", source.display());
    let mut records = dataset::read_dataset(source)?;

    if level == 0.0 {
        log::info!("Poison level is 0. Using original data.");
    }

    let report = match seed {
        Some(seed) => poison_records(&mut records, level, &mut StdRng::seed_from_u64(seed))?,
        None => poison_records(&mut records, level, &mut rand::thread_rng())?,
    };

    log::info!(
        "Poisoning {} rows ({:.0}%) of the data",
        report.poisoned_count(),
        level * 100.0
    );

    log::info!("Saving poisoned data to {}", dest.display());
    dataset::write_dataset(dest, &records)?;

    Ok(report)
}
