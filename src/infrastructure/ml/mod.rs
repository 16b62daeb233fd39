pub mod onnx_estimator;
pub mod smartcore_estimator;

pub use onnx_estimator::OnnxEstimator;
pub use smartcore_estimator::SmartCoreEstimator;

use crate::config::{ModelEnvConfig, ModelFormat};
use crate::domain::errors::LoadError;
use crate::domain::ports::Estimator;
use std::sync::Arc;
use tracing::{error, info};

/// Loads the configured estimator artifact.
/// A failure here is fatal to startup.
pub fn load_estimator(config: &ModelEnvConfig) -> Result<Arc<dyn Estimator>, LoadError> {
    info!(
        "Loading {:?} model from {:?}",
        config.format, config.model_path
    );

    let loaded = match config.format {
        ModelFormat::Linear => SmartCoreEstimator::load_linear(&config.model_path)
            .map(|e| Arc::new(e) as Arc<dyn Estimator>),
        ModelFormat::RandomForest => SmartCoreEstimator::load_random_forest(&config.model_path)
            .map(|e| Arc::new(e) as Arc<dyn Estimator>),
        ModelFormat::Onnx => {
            OnnxEstimator::load(&config.model_path).map(|e| Arc::new(e) as Arc<dyn Estimator>)
        }
    };

    if let Err(e) = &loaded {
        error!("Failed to load estimator: {}", e);
    }
    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_estimator_missing_artifact() {
        for format in [ModelFormat::Linear, ModelFormat::RandomForest, ModelFormat::Onnx] {
            let config = ModelEnvConfig {
                model_path: PathBuf::from("models/absent_model"),
                format,
                model_id: "test".to_string(),
            };
            assert!(matches!(
                load_estimator(&config),
                Err(LoadError::NotFound { .. })
            ));
        }
    }
}
