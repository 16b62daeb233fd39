use crate::domain::errors::{InferenceError, PredictError};
use crate::domain::ml::{FeatureRecord, PredictionResult, validate_payload, vectorize};
use crate::domain::ports::Estimator;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Readiness probe payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub model: String,
}

/// Serves predictions from a single loaded estimator.
///
/// The estimator is injected at construction and never mutated, so one service
/// can be shared across every request handler.
#[derive(Clone)]
pub struct InferenceService {
    estimator: Arc<dyn Estimator>,
    model_id: String,
}

impl InferenceService {
    pub fn new(estimator: Arc<dyn Estimator>, model_id: impl Into<String>) -> Self {
        Self {
            estimator,
            model_id: model_id.into(),
        }
    }

    /// Validates an untrusted payload and predicts.
    /// Validation failures return before the estimator is touched.
    pub fn predict(&self, payload: &Value) -> Result<PredictionResult, PredictError> {
        let record = validate_payload(payload)?;
        Ok(self.predict_record(&record)?)
    }

    /// Predicts for an already-typed record
    pub fn predict_record(&self, record: &FeatureRecord) -> Result<PredictionResult, InferenceError> {
        let features = vectorize(record);
        let raw = self.estimator.predict(&features)?;
        if !raw.is_finite() {
            return Err(InferenceError::NonFiniteScore { score: raw });
        }

        let result = PredictionResult::from_raw(raw);
        debug!(
            "{} predicted raw={} score={} ({})",
            self.estimator.name(),
            raw,
            result.score,
            result.interpretation
        );
        Ok(result)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "healthy",
            model: self.model_id.clone(),
        }
    }

    pub fn estimator_name(&self) -> &str {
        self.estimator.name()
    }
}
