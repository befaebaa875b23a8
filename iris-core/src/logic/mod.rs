//! Pipeline logic

pub mod features;
pub mod dataset;
pub mod model;
pub mod poison;
pub mod evaluation;
pub mod plots;
