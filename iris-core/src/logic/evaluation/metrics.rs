//! Metrics file - a plain `accuracy: <value>` line

use std::fs;
use std::path::Path;

use super::EvaluationError;

pub fn write_metrics(path: &Path, accuracy: f64) -> Result<(), EvaluationError> {
    let io_err = |source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, format!("accuracy: {}\n", accuracy)).map_err(io_err)
}

pub fn read_metrics(path: &Path) -> Result<f64, EvaluationError> {
    if !path.exists() {
        return Err(EvaluationError::NotFound {
            kind: "metrics file",
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_metrics(&content)
}

/// Value of the first `accuracy:` line
pub fn parse_metrics(content: &str) -> Result<f64, EvaluationError> {
    content
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("accuracy"))
        .and_then(|(_, value)| value.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| EvaluationError::MalformedMetrics(content.trim().to_string()))
}
