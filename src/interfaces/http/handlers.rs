//! HTTP handlers for prediction and health.

use super::error::ApiError;
use super::routes::AppState;
use crate::application::inference_service::HealthStatus;
use crate::domain::errors::{PredictError, ValidationError};
use crate::domain::ml::PredictionResponse;
use crate::infrastructure::observability::metrics::{REJECTION_INFERENCE, REJECTION_VALIDATION};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, warn};

/// `GET /`
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(state.service.health())
}

/// `POST /predict`
///
/// The body is parsed here rather than through the `Json` extractor so that
/// malformed JSON is reported with the same 422 shape as schema violations.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>, ApiError> {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            state.metrics.inc_rejected(REJECTION_VALIDATION);
            warn!("Rejected prediction request: malformed body: {}", e);
            return Err(ValidationError::MalformedBody {
                reason: e.to_string(),
            }
            .into());
        }
    };

    let started = Instant::now();
    let outcome = state.service.predict(&payload);
    if !matches!(outcome, Err(PredictError::Validation(_))) {
        state.metrics.observe_prediction_latency(
            state.service.estimator_name(),
            started.elapsed().as_secs_f64(),
        );
    }

    match outcome {
        Ok(result) => {
            state.metrics.inc_predictions(result.interpretation);
            debug!("Prediction served: {} ({})", result.score, result.interpretation);
            Ok(Json(result.into()))
        }
        Err(PredictError::Validation(e)) => {
            state.metrics.inc_rejected(REJECTION_VALIDATION);
            warn!("Rejected prediction request: {}", e);
            Err(e.into())
        }
        Err(PredictError::Inference(e)) => {
            state.metrics.inc_rejected(REJECTION_INFERENCE);
            error!("Inference failed: {}", e);
            Err(e.into())
        }
    }
}
