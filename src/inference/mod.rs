use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{ApiHealth, PredictionRequest, PredictionResult, ServiceInfo};

pub mod client;
pub mod http;

pub use client::PredictionClient;
pub use http::HttpInferenceService;

/// Remote inference service as seen by the dashboard.
///
/// Implementations perform exactly one round trip per call and never retry.
/// `predict` returns the payload as decoded, unit normalization and range
/// checks happen in [`PredictionClient`].
#[async_trait]
pub trait InferenceService: Send + Sync {
    fn name(&self) -> &str;

    async fn health(&self) -> Result<ApiHealth, TransportError>;

    async fn service_info(&self) -> Result<ServiceInfo, TransportError>;

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, TransportError>;

    async fn predict_batch(
        &self,
        requests: &[PredictionRequest],
    ) -> Result<serde_json::Value, TransportError>;
}
