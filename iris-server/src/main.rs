//! Iris Prediction Service
//!
//! Thin HTTP wrapper around a pre-trained Iris classifier.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    IRIS PREDICTION SERVICE                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  API      │  │  Health   │  │  Tracing                │ │
//! │  │  (Axum)   │  │  live /   │  │  (JSON logs + spans)    │ │
//! │  │           │  │  ready    │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │                ┌─────────────┐                             │
//! │                │ Classifier  │  loaded once, read-only     │
//! │                └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod model_store;
mod telemetry;

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};
use model_store::SharedClassifier;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging
    telemetry::init(&config);

    tracing::info!("Iris Classifier API starting...");
    tracing::info!(
        trace_project = %config.trace_project,
        environment = %config.environment,
        "Tracing destination configured"
    );

    // The service never starts without a model
    let model = model_store::load_classifier(&config.model_path)
        .with_context(|| format!("Failed to load model from {}", config.model_path.display()))?;

    // Build application state
    let state = AppState {
        model: Some(model),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` only before a model has been loaded
    pub model: Option<SharedClassifier>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/live_check", get(handlers::health::live_check))
        .route("/ready_check", get(handlers::health::ready_check))
        .route("/predict", post(handlers::predict::predict))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
