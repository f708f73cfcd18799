use crate::domain::model::{MetricInput, ScoreResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The external scoring backend. Nothing in the dashboard assumes anything
/// about how the score is computed.
#[async_trait]
pub trait ScoreService: Send + Sync {
    async fn compute_score(&self, input: &MetricInput) -> Result<ScoreResult>;
}

pub trait ServiceConfig: Send + Sync {
    fn base_url(&self) -> &str;
    fn analyze_path(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;
}
