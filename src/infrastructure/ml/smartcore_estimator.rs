use crate::domain::errors::{InferenceError, LoadError};
use crate::domain::ml::FeatureVector;
use crate::domain::ports::Estimator;
use serde::de::DeserializeOwned;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::linear_regression::LinearRegression;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub type LinearModel = LinearRegression<f64, f64, DenseMatrix<f64>, Vec<f64>>;
pub type ForestModel = RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>;

enum SmartCoreModel {
    Linear(LinearModel),
    RandomForest(ForestModel),
}

/// Estimator backed by a smartcore model serialized with serde_json.
/// smartcore models are immutable after fitting and safe to share across threads.
pub struct SmartCoreEstimator {
    model: SmartCoreModel,
}

impl SmartCoreEstimator {
    pub fn load_linear(model_path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let model_path = model_path.into();
        let model = read_model::<LinearModel>(&model_path)?;
        info!("Loaded linear regression model from {:?}", model_path);
        Ok(Self::from_linear(model))
    }

    pub fn load_random_forest(model_path: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let model_path = model_path.into();
        let model = read_model::<ForestModel>(&model_path)?;
        info!("Loaded random forest model from {:?}", model_path);
        Ok(Self::from_random_forest(model))
    }

    pub fn from_linear(model: LinearModel) -> Self {
        Self {
            model: SmartCoreModel::Linear(model),
        }
    }

    pub fn from_random_forest(model: ForestModel) -> Self {
        Self {
            model: SmartCoreModel::RandomForest(model),
        }
    }
}

fn read_model<M: DeserializeOwned>(path: &Path) -> Result<M, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let buffer = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&buffer).map_err(|e| LoadError::Deserialize {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl Estimator for SmartCoreEstimator {
    fn predict(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let input_matrix =
            DenseMatrix::from_2d_vec(&vec![features.to_vec()]).map_err(|e| {
                InferenceError::InvalidInput {
                    reason: e.to_string(),
                }
            })?;

        let predictions = match &self.model {
            SmartCoreModel::Linear(model) => model.predict(&input_matrix),
            SmartCoreModel::RandomForest(model) => model.predict(&input_matrix),
        }
        .map_err(|e| InferenceError::PredictionFailed {
            reason: e.to_string(),
        })?;

        predictions.first().copied().ok_or(InferenceError::EmptyOutput)
    }

    fn name(&self) -> &str {
        match self.model {
            SmartCoreModel::Linear(_) => "SmartCore Linear Regression",
            SmartCoreModel::RandomForest(_) => "SmartCore Random Forest",
        }
    }
}
