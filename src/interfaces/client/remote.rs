use crate::domain::errors::ClientError;
use crate::domain::ml::{FeatureRecord, PredictionResponse, PredictionResult};
use crate::infrastructure::core::HttpClientFactory;
use crate::interfaces::http::{ServerErrorBody, ValidationErrorBody};
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde::Deserialize;
use tracing::info;

/// Health probe response as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

/// Client for a running prediction server
pub struct RemoteClient {
    base_url: String,
    client: ClientWithMiddleware,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, HttpClientFactory::create_client())
    }

    pub fn with_client(base_url: impl Into<String>, client: ClientWithMiddleware) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(ClientError::Server {
                status: response.status().as_u16(),
                detail: response.text().await.unwrap_or_default(),
            });
        }

        response.json::<HealthResponse>().await.map_err(|e| ClientError::Transport {
            reason: e.to_string(),
        })
    }

    pub async fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult, ClientError> {
        let url = format!("{}/predict", self.base_url);
        info!("Requesting prediction from {}", url);

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::Transport {
            reason: e.to_string(),
        })?;

        if status.is_success() {
            let parsed: PredictionResponse =
                serde_json::from_str(&body).map_err(|e| ClientError::Transport {
                    reason: format!("Unexpected response body: {}", e),
                })?;
            return Ok(parsed.into());
        }

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            if let Ok(rejection) = serde_json::from_str::<ValidationErrorBody>(&body) {
                let details = rejection
                    .detail
                    .iter()
                    .map(|d| format!("{}: {}", d.loc.join("."), d.msg))
                    .collect();
                return Err(ClientError::Rejected { details });
            }
        }

        let detail = serde_json::from_str::<ServerErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or(body);
        Err(ClientError::Server {
            status: status.as_u16(),
            detail,
        })
    }
}
