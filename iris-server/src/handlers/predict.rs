//! Prediction handler

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{field, Span};
use uuid::Uuid;

use iris_core::logic::model::predict_record;
use iris_core::{Classifier, FeatureRecord, InferenceError, PredictionResult};

use crate::{AppError, AppResult, AppState};

/// Classify one flower.
///
/// Malformed bodies are rejected before the model is touched. Inference
/// failures are logged in full under the request's trace id and reach the
/// caller only as a generic 500.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<FeatureRecord>, JsonRejection>,
) -> AppResult<Json<PredictionResult>> {
    let Json(record) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed prediction request");
        AppError::from(rejection)
    })?;

    let model = state.model.clone().ok_or(AppError::ModelNotReady)?;

    let trace_id = Uuid::new_v4().simple().to_string();
    let span = tracing::info_span!(
        "predict",
        trace_id = %trace_id,
        trace_project = %state.config.trace_project,
        payload = %record.to_log_entry(),
        latency_ms = field::Empty,
        predicted_species = field::Empty,
        exception = field::Empty,
    );

    let result = span.in_scope(|| run_prediction(model.as_ref(), &record, &trace_id, &span))?;
    Ok(Json(result))
}

fn run_prediction(
    model: &dyn Classifier,
    record: &FeatureRecord,
    trace_id: &str,
    span: &Span,
) -> AppResult<PredictionResult> {
    tracing::info!(trace_id, "Received prediction request");

    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| predict_record(model, record)))
        .unwrap_or_else(|payload| Err(InferenceError::Backend(panic_message(payload.as_ref()))));
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    span.record("latency_ms", latency_ms);

    match outcome {
        Ok(result) => {
            span.record("predicted_species", result.predicted_species.as_str());
            tracing::info!(
                trace_id,
                latency_ms,
                predicted_species = %result.predicted_species,
                "Prediction succeeded"
            );
            Ok(result)
        }
        Err(e) => {
            span.record("exception", field::display(&e));
            tracing::error!(
                trace_id,
                latency_ms,
                error = %e,
                error_detail = ?e,
                "Prediction failed"
            );
            Err(AppError::Inference {
                trace_id: trace_id.to_string(),
            })
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("classifier panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("classifier panicked: {}", s)
    } else {
        "classifier panicked".to_string()
    }
}
