//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    InvalidInput(String),

    // Readiness errors
    ModelNotReady,

    // Inference errors, already logged with their trace id
    Inference { trace_id: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.as_str()),
            AppError::ModelNotReady => (StatusCode::SERVICE_UNAVAILABLE, "Model not loaded"),
            AppError::Inference { trace_id } => {
                tracing::debug!(trace_id = %trace_id, "Returning generic error for failed inference");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
