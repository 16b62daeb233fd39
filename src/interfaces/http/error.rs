use crate::domain::errors::{InferenceError, PredictError, ValidationError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// One entry of a 422 response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorDetail {
    fn body(msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub detail: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerErrorBody {
    pub detail: String,
}

impl From<&ValidationError> for ValidationErrorBody {
    fn from(error: &ValidationError) -> Self {
        let detail = match error {
            ValidationError::MalformedBody { reason } => {
                vec![ErrorDetail::body(format!("JSON decode error: {}", reason), "json_invalid")]
            }
            ValidationError::NotAnObject => vec![ErrorDetail::body(
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )],
            ValidationError::InvalidFields { issues } => issues
                .iter()
                .map(|issue| ErrorDetail {
                    loc: vec!["body".to_string(), issue.field.to_string()],
                    msg: issue.kind.message().to_string(),
                    kind: issue.kind.code().to_string(),
                })
                .collect(),
        };
        Self { detail }
    }
}

/// HTTP mapping of prediction failures
#[derive(Debug)]
pub struct ApiError(pub PredictError);

impl From<PredictError> for ApiError {
    fn from(error: PredictError) -> Self {
        Self(error)
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self(PredictError::Validation(error))
    }
}

impl From<InferenceError> for ApiError {
    fn from(error: InferenceError) -> Self {
        Self(PredictError::Inference(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            PredictError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorBody::from(e)),
            )
                .into_response(),
            PredictError::Inference(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ServerErrorBody {
                    detail: e.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{FieldIssue, FieldIssueKind};

    #[test]
    fn test_field_issues_map_to_details() {
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

        let body = ValidationErrorBody::from(&error);
        assert_eq!(body.detail.len(), 2);
        assert_eq!(body.detail[0].loc, vec!["body", "sex"]);
        assert_eq!(body.detail[0].kind, "missing");
        assert_eq!(body.detail[1].kind, "float_parsing");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["detail"][1]["type"], "float_parsing");
    }

    #[test]
    fn test_status_codes() {
        let response = ApiError::from(ValidationError::NotAnObject).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::from(InferenceError::EmptyOutput).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
