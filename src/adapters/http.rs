use crate::domain::model::{MetricInput, ScoreResult};
use crate::domain::ports::{ScoreService, ServiceConfig};
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// `ScoreService` backed by `POST {base_url}{analyze_path}`.
pub struct HttpScoreService {
    client: Client,
    endpoint: Url,
}

impl HttpScoreService {
    pub fn new<C: ServiceConfig>(config: &C) -> Result<Self> {
        let base = Url::parse(config.base_url()).map_err(|e| {
            DashboardError::InvalidConfigValueError {
                field: "service.base_url".to_string(),
                value: config.base_url().to_string(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;
        let endpoint = base.join(config.analyze_path()).map_err(|e| {
            DashboardError::InvalidConfigValueError {
                field: "service.analyze_path".to_string(),
                value: config.analyze_path().to_string(),
                reason: format!("Cannot join with base URL: {}", e),
            }
        })?;

        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl ScoreService for HttpScoreService {
    async fn compute_score(&self, input: &MetricInput) -> Result<ScoreResult> {
        tracing::debug!("POST {} with {:?}", self.endpoint, input);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(input)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Score service response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DashboardError::ServiceError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let result: ScoreResult = serde_json::from_slice(&body)?;
        Ok(result)
    }
}
