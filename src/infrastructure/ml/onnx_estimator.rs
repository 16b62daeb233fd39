use crate::domain::errors::{InferenceError, LoadError};
use crate::domain::ml::{FEATURE_COUNT, FeatureVector};
use crate::domain::ports::Estimator;
use ort::session::Session;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;

/// Estimator backed by an ONNX graph exported from the training pipeline.
///
/// The graph is expected to take a single `[1, 10]` f32 input in feature order
/// and produce a single score. `Session::run` needs exclusive access, so calls
/// are serialized through a mutex.
pub struct OnnxEstimator {
    session: Mutex<Session>,
}

impl OnnxEstimator {
    pub fn load(model_path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let model_path = model_path.into();
        if !model_path.exists() {
            return Err(LoadError::NotFound { path: model_path });
        }

        let session = Session::builder()
            .map_err(|e| LoadError::Runtime {
                path: model_path.clone(),
                reason: e.to_string(),
            })?
            .commit_from_file(&model_path)
            .map_err(|e| LoadError::Runtime {
                path: model_path.clone(),
                reason: e.to_string(),
            })?;

        info!("Successfully loaded ONNX model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Estimator for OnnxEstimator {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| InferenceError::Unavailable {
                reason: format!("Session lock poisoned: {}", e),
            })?;

        let shape = vec![1, FEATURE_COUNT];
        let input_value = ort::value::Value::from_array((shape.as_slice(), features.to_f32_vec()))
            .map_err(|e| InferenceError::InvalidInput {
                reason: e.to_string(),
            })?;

        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| InferenceError::PredictionFailed {
                reason: e.to_string(),
            })?;

        let output_value = outputs
            .iter()
            .next()
            .map(|(_, v)| v)
            .ok_or(InferenceError::EmptyOutput)?;
        let data = output_value
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::PredictionFailed {
                reason: e.to_string(),
            })?;

        data.1
            .iter()
            .next()
            .map(|score| *score as f64)
            .ok_or(InferenceError::EmptyOutput)
    }

    fn name(&self) -> &str {
        "ONNX Runtime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_onnx_model_is_a_load_error() {
        let result = OnnxEstimator::load(PathBuf::from("non_existent.onnx"));
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }
}
