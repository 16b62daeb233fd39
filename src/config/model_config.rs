//! Estimator artifact configuration parsing from environment variables.
//!
//! The artifact is loaded once at startup from `MODEL_PATH`; its serialization
//! is chosen with `MODEL_FORMAT` or inferred from the file extension.

use anyhow::Result;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const DEFAULT_MODEL_PATH: &str = "models/diabetes_model.json";
pub const DEFAULT_MODEL_ID: &str = "diabetes_progression_v1";

/// Serialization of the estimator artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// smartcore `LinearRegression`, serde_json
    Linear,
    /// smartcore `RandomForestRegressor`, serde_json
    RandomForest,
    /// ONNX graph
    Onnx,
}

impl ModelFormat {
    pub fn infer_from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("onnx") => ModelFormat::Onnx,
            _ => ModelFormat::Linear,
        }
    }
}

impl FromStr for ModelFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear" => Ok(ModelFormat::Linear),
            "random_forest" | "forest" => Ok(ModelFormat::RandomForest),
            "onnx" => Ok(ModelFormat::Onnx),
            _ => anyhow::bail!(
                "Invalid MODEL_FORMAT: {}. Must be 'linear', 'random_forest', or 'onnx'",
                s
            ),
        }
    }
}

/// Estimator environment configuration
#[derive(Debug, Clone)]
pub struct ModelEnvConfig {
    pub model_path: PathBuf,
    pub format: ModelFormat,
    /// Identifier reported by the health probe
    pub model_id: String,
}

impl ModelEnvConfig {
    pub fn from_env() -> Result<Self> {
        let model_path = PathBuf::from(
            env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
        );
        let format = match env::var("MODEL_FORMAT") {
            Ok(raw) if !raw.trim().is_empty() => ModelFormat::from_str(raw.trim())?,
            _ => ModelFormat::infer_from_path(&model_path),
        };
        let model_id = env::var("MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());

        Ok(Self {
            model_path,
            format,
            model_id,
        })
    }

    /// Configuration for an explicit artifact path, format inferred
    pub fn for_path(model_path: impl Into<PathBuf>) -> Self {
        let model_path = model_path.into();
        Self {
            format: ModelFormat::infer_from_path(&model_path),
            model_path,
            model_id: DEFAULT_MODEL_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_format_parsing() {
        assert_eq!(ModelFormat::from_str("LINEAR").unwrap(), ModelFormat::Linear);
        assert_eq!(
            ModelFormat::from_str("random_forest").unwrap(),
            ModelFormat::RandomForest
        );
        assert_eq!(ModelFormat::from_str("onnx").unwrap(), ModelFormat::Onnx);
        assert!(ModelFormat::from_str("pickle").is_err());
    }

    #[test]
    fn test_model_format_inferred_from_extension() {
        assert_eq!(
            ModelFormat::infer_from_path(Path::new("models/diabetes.ONNX")),
            ModelFormat::Onnx
        );
        assert_eq!(
            ModelFormat::infer_from_path(Path::new("models/diabetes_model.json")),
            ModelFormat::Linear
        );
    }

    #[test]
    fn test_for_path() {
        let config = ModelEnvConfig::for_path("model.onnx");
        assert_eq!(config.format, ModelFormat::Onnx);
        assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    }
}
