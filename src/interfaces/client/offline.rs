use crate::application::inference_service::InferenceService;
use crate::config::ModelEnvConfig;
use crate::domain::errors::ClientError;
use crate::domain::ml::{FeatureRecord, PredictionResult};
use crate::infrastructure::ml::load_estimator;

/// In-process client with a locally loaded estimator
pub struct OfflineClient {
    service: InferenceService,
}

impl OfflineClient {
    pub fn load(config: &ModelEnvConfig) -> Result<Self, ClientError> {
        let estimator = load_estimator(config)?;
        Ok(Self::new(InferenceService::new(estimator, config.model_id.clone())))
    }

    pub fn new(service: InferenceService) -> Self {
        Self { service }
    }

    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult, ClientError> {
        Ok(self.service.predict_record(record)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{InferenceError, LoadError};
    use crate::domain::ml::{FeatureVector, Interpretation};
    use crate::domain::ports::Estimator;
    use std::sync::Arc;

    /// Sums the inputs so the feature order is irrelevant to the expected score
    struct SumEstimator;

    impl Estimator for SumEstimator {
        fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(features.as_slice().iter().sum())
        }

        fn name(&self) -> &str {
            "sum"
        }
    }

    #[test]
    fn test_offline_predict() {
        let client = OfflineClient::new(InferenceService::new(Arc::new(SumEstimator), "v1"));
        let record = FeatureRecord::from_ordered([10.0; 10]);

        let result = client.predict(&record).unwrap();
        assert_eq!(result.score, 100.0);
        assert_eq!(result.interpretation, Interpretation::Average);
    }

    #[test]
    fn test_offline_load_failure() {
        let config = ModelEnvConfig::for_path("models/not_here.json");
        assert!(matches!(
            OfflineClient::load(&config),
            Err(ClientError::Load(LoadError::NotFound { .. }))
        ));
    }
}
