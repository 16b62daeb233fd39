use crate::domain::errors::InferenceError;
use crate::domain::ml::FeatureVector;

/// A pre-fitted regression model.
///
/// Implementations are loaded once at startup and shared read-only by every
/// request, so `predict` takes `&self` and must not mutate model state.
pub trait Estimator: Send + Sync {
    /// Predict a raw progression score for one patient
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
