//! Status, liveness and readiness handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppResult, AppState};

#[derive(Serialize)]
pub struct StatusMessage {
    message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

pub async fn root() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Iris Classifier API is running!",
    })
}

/// Succeeds whenever the process is up
pub async fn live_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: None,
    })
}

/// Succeeds only once the model artifact is loaded
pub async fn ready_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let model = state.model.as_ref().ok_or(AppError::ModelNotReady)?;

    Ok(Json(HealthResponse {
        status: "ready",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: Some(model.describe()),
    }))
}
