//! Features Module - Iris measurements
//!
//! A `FeatureRecord` is one flower; a `FeatureTable` is the named-column
//! matrix a classifier consumes.

pub mod record;
pub mod table;


pub use record::{FeatureRecord, FEATURE_COUNT, FEATURE_NAMES};
pub use table::FeatureTable;
