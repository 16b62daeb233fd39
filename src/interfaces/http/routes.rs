//! HTTP Routes
//!
//! Axum router configuration for the prediction server.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::inference_service::InferenceService;
use crate::infrastructure::observability::Metrics;

/// Application state shared across handlers
pub struct AppState {
    pub service: InferenceService,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(service: InferenceService, metrics: Metrics) -> Self {
        Self { service, metrics }
    }
}

/// Create the main application router
///
/// # Routes
///
/// - `GET /` - Health probe with the loaded model identifier
/// - `POST /predict` - Predict a progression score for one patient
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health_check))
        .route("/predict", post(handlers::predict))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
