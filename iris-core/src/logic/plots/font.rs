//! Chart font registration
//!
//! Chart text is drawn with a TrueType font registered under "sans-serif".
//! `PLOT_FONT_PATH` and a few system locations are tried in order; DejaVu
//! Sans ships with the crate and is used when none of them loads.

use std::path::PathBuf;
use std::sync::OnceLock;

use plotters::style::FontStyle;

use super::PlotError;
use crate::constants::{FALLBACK_FONT_PATHS, PLOT_FONT_ENV};

pub const FONT_FAMILY: &str = "sans-serif";

static BUNDLED_FONT: &[u8] = include_bytes!("../../../assets/DejaVuSans.ttf");

static FONT: OnceLock<Result<FontSource, String>> = OnceLock::new();

/// Where the registered chart font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Bundled,
}

/// Register the chart font once per process
pub fn ensure_font() -> Result<FontSource, PlotError> {
    FONT.get_or_init(|| register_first(&candidate_paths()))
        .clone()
        .map_err(PlotError::Render)
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = std::env::var_os(PLOT_FONT_ENV).map(PathBuf::from) {
        if !path.is_file() {
            log::warn!("{} points at {}, which does not exist", PLOT_FONT_ENV, path.display());
        }
        paths.push(path);
    }

    paths.extend(FALLBACK_FONT_PATHS.iter().map(PathBuf::from));
    paths
}

/// Register the first loadable font in `candidates`, else the bundled one
pub(crate) fn register_first(candidates: &[PathBuf]) -> Result<FontSource, String> {
    for path in candidates.iter().filter(|p| p.is_file()) {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read font {}: {}", path.display(), e);
                continue;
            }
        };

        // Registered fonts must outlive every chart.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());

        if register(bytes) {
            log::debug!("Registered chart font {}", path.display());
            return Ok(FontSource::File(path.clone()));
        }
        log::warn!("{} is not a usable TrueType font", path.display());
    }

    if register(BUNDLED_FONT) {
        log::debug!("Registered bundled chart font");
        Ok(FontSource::Bundled)
    } else {
        Err("bundled chart font could not be loaded".to_string())
    }
}

fn register(bytes: &'static [u8]) -> bool {
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes).is_ok()
}
