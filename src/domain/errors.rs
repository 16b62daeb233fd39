use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a single field of a prediction request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssueKind {
    Missing,
    NotNumeric,
}

impl FieldIssueKind {
    /// Machine-readable error type used in API error payloads
    pub fn code(&self) -> &'static str {
        match self {
            FieldIssueKind::Missing => "missing",
            FieldIssueKind::NotNumeric => "float_parsing",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FieldIssueKind::Missing => "Field required",
            FieldIssueKind::NotNumeric => "Input should be a valid number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub kind: FieldIssueKind,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind.message())
    }
}

/// Request input could not be turned into a feature vector.
/// The estimator is never invoked when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Request body is not valid JSON: {reason}")]
    MalformedBody { reason: String },

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Invalid fields: {}", format_issues(.issues))]
    InvalidFields { issues: Vec<FieldIssue> },
}

impl ValidationError {
    /// Names of the offending fields, in feature order
    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::InvalidFields { issues } => issues.iter().map(|i| i.field).collect(),
            _ => Vec::new(),
        }
    }
}

fn format_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The estimator failed to produce a usable score
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("Input matrix creation failed: {reason}")]
    InvalidInput { reason: String },

    #[error("Prediction failed: {reason}")]
    PredictionFailed { reason: String },

    #[error("Estimator returned no prediction")]
    EmptyOutput,

    #[error("Estimator returned a non-finite score: {score}")]
    NonFiniteScore { score: f64 },

    #[error("Estimator unavailable: {reason}")]
    Unavailable { reason: String },
}

/// The estimator artifact could not be loaded at startup
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("Failed to read model file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize model from {path:?}: {reason}")]
    Deserialize { path: PathBuf, reason: String },

    #[error("Failed to initialise model runtime for {path:?}: {reason}")]
    Runtime { path: PathBuf, reason: String },
}

/// Errors returned by the inference service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

/// Errors surfaced by the client front-ends
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Please fill all fields with valid numbers: {}", .fields.join(", "))]
    Form { fields: Vec<&'static str> },

    #[error("Could not reach prediction service: {reason}")]
    Transport { reason: String },

    #[error("Prediction request rejected: {}", .details.join("; "))]
    Rejected { details: Vec<String> },

    #[error("Prediction service error ({status}): {detail}")]
    Server { status: u16, detail: String },

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let error = ValidationError::InvalidFields {
            issues: vec![
                FieldIssue {
                    field: "sex",
                    kind: FieldIssueKind::Missing,
                },
                FieldIssue {
                    field: "bmi",
                    kind: FieldIssueKind::NotNumeric,
                },
            ],
        };

        let msg = error.to_string();
        assert!(msg.contains("sex: Field required"));
        assert!(msg.contains("bmi: Input should be a valid number"));
        assert_eq!(error.fields(), vec!["sex", "bmi"]);
    }

    #[test]
    fn test_load_error_formatting() {
        let error = LoadError::NotFound {
            path: PathBuf::from("models/missing.json"),
        };
        assert!(error.to_string().contains("models/missing.json"));
    }

    #[test]
    fn test_predict_error_is_transparent() {
        let error: PredictError = InferenceError::EmptyOutput.into();
        assert_eq!(error.to_string(), "Estimator returned no prediction");
    }
}
