//! Logging and trace output
//!
//! Span close events carry the recorded fields plus busy/idle time, so each
//! prediction produces one annotated span record next to its log lines.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

const DEFAULT_FILTER: &str = "iris_server=info,iris_core=info,tower_http=info";

pub fn init(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(!config.is_production())
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init(),
    }
}
