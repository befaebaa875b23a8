//! Central Configuration Constants
//!
//! Single source of truth for pipeline file locations and thresholds.
//! Every CLI flag defaults to one of these.

/// Source dataset consumed by the poisoner and the evaluator
pub const DEFAULT_SOURCE_DATA_PATH: &str = "data/iris.csv";

/// Output of the poisoner
pub const DEFAULT_POISONED_DATA_PATH: &str = "data/iris_poisoned.csv";

/// Serialized classifier exported by the training step
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.json";

/// Plain-text metrics file (`accuracy: <value>`)
pub const DEFAULT_METRICS_PATH: &str = "metrics.txt";

/// Results bundle written by the evaluator, read by the plot generator
pub const DEFAULT_RESULTS_PATH: &str = "test_results.json";

/// Directory for rendered charts
pub const DEFAULT_PLOTS_DIR: &str = "plots";

/// Minimum accuracy a model must reach to pass the quality gate
pub const DEFAULT_ACCURACY_THRESHOLD: f64 = 0.85;

/// Env var pointing at a TrueType font used for chart text
pub const PLOT_FONT_ENV: &str = "PLOT_FONT_PATH";

/// System fonts tried after `PLOT_FONT_PATH`, before the bundled font
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];
