//! Configuration module

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use iris_core::constants::DEFAULT_MODEL_PATH;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the JSON model artifact
    pub model_path: PathBuf,

    /// Bind address
    pub host: IpAddr,

    /// Server port
    pub port: u16,

    /// Tracing backend project / destination
    pub trace_project: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            trace_project: "local".to_string(),
            log_format: LogFormat::Json,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),

            host: env::var("HOST")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(defaults.host),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            trace_project: env::var("TRACE_PROJECT_ID")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.trace_project),

            log_format: env::var("LOG_FORMAT")
                .ok()
                .and_then(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
