use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::InferenceService;
use crate::core::config::{normalize_base_url, DashboardSettings};
use crate::error::TransportError;
use crate::models::{ApiHealth, BatchPredictionRequest, PredictionRequest, PredictionResult, ServiceInfo};

pub struct HttpInferenceService {
    base_url: String,
    client: Client,
}

impl HttpInferenceService {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("EpidemicDashboard/1.0"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    /// Use a preconfigured client, e.g. one with proxies disabled.
    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    pub fn from_settings(settings: &DashboardSettings) -> Self {
        Self::new(&settings.api_url, settings.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a response to `T`, treating any non-2xx status as a transport failure.
    async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, TransportError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.to_string(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl InferenceService for HttpInferenceService {
    fn name(&self) -> &str {
        "http"
    }

    async fn health(&self) -> Result<ApiHealth, TransportError> {
        let url = self.url("/health");
        debug!("Probing inference API: {}", url);
        let resp = self.client.get(&url).send().await?;
        Self::read_json(resp).await
    }

    async fn service_info(&self) -> Result<ServiceInfo, TransportError> {
        let resp = self.client.get(self.url("/")).send().await?;
        Self::read_json(resp).await
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, TransportError> {
        let url = self.url("/predict");
        info!(
            "Requesting prediction: {} ({}) with {} weeks of history",
            request.disease,
            request.location,
            request.history.len()
        );

        let resp = self.client.post(&url).json(request).send().await?;
        Self::read_json(resp).await
    }

    async fn predict_batch(
        &self,
        requests: &[PredictionRequest],
    ) -> Result<serde_json::Value, TransportError> {
        let url = self.url("/predict/batch");
        info!("Requesting batch prediction for {} entries", requests.len());

        let body = BatchPredictionRequest { predictions: requests };
        let resp = self.client.post(&url).json(&body).send().await?;
        Self::read_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = HttpInferenceService::new("http://localhost:5000/", Duration::from_secs(1));
        assert_eq!(service.base_url(), "http://localhost:5000");
        assert_eq!(service.url("/predict/batch"), "http://localhost:5000/predict/batch");
    }
}
