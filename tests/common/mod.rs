#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use epidemic_dashboard_lib::models::{ApiHealth, PredictionRequest, PredictionResult, ServiceInfo};
use epidemic_dashboard_lib::{Catalog, InferenceService, TransportError};
use serde_json::{json, Value};

/// In-memory inference service that records every call it receives.
#[derive(Clone)]
pub struct StubService {
    requests: Arc<Mutex<Vec<PredictionRequest>>>,
    batches: Arc<AtomicUsize>,
    health_calls: Arc<AtomicUsize>,
    prediction: Option<Value>,
    healthy: bool,
    delays: HashMap<String, Duration>,
}

impl StubService {
    /// Answers every prediction with `template`, echoing the requested disease and location.
    pub fn answering(template: Value) -> Self {
        StubService {
            requests: Arc::new(Mutex::new(Vec::new())),
            batches: Arc::new(AtomicUsize::new(0)),
            health_calls: Arc::new(AtomicUsize::new(0)),
            prediction: Some(template),
            healthy: true,
            delays: HashMap::new(),
        }
    }

    /// Every call fails with a 503.
    pub fn unavailable() -> Self {
        StubService {
            prediction: None,
            healthy: false,
            ..StubService::answering(Value::Null)
        }
    }

    pub fn with_delay(mut self, disease: &str, delay: Duration) -> Self {
        self.delays.insert(disease.to_string(), delay);
        self
    }

    pub fn predict_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn batch_calls(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn unavailable_error() -> TransportError {
        TransportError::Status {
            status: "503 Service Unavailable".to_string(),
            body: String::new(),
        }
    }
}

#[async_trait]
impl InferenceService for StubService {
    fn name(&self) -> &str {
        "stub"
    }

    async fn health(&self) -> Result<ApiHealth, TransportError> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy {
            Ok(ApiHealth(json!({ "status": "healthy", "model_loaded": true })))
        } else {
            Err(Self::unavailable_error())
        }
    }

    async fn service_info(&self) -> Result<ServiceInfo, TransportError> {
        Ok(ServiceInfo {
            message: "stub".into(),
            version: "1.0".into(),
            endpoints: Default::default(),
        })
    }

    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(delay) = self.delays.get(&request.disease) {
            tokio::time::sleep(*delay).await;
        }

        let mut body = self.prediction.clone().ok_or_else(Self::unavailable_error)?;
        body["disease"] = json!(request.disease);
        body["location"] = json!(request.location);
        serde_json::from_value(body).map_err(|e| TransportError::Malformed(e.to_string()))
    }

    async fn predict_batch(&self, requests: &[PredictionRequest]) -> Result<Value, TransportError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        Ok(json!({ "results": requests.len() }))
    }
}

/// `weeks` weekly records with a couple of model features each.
pub fn history(weeks: usize) -> Vec<Value> {
    (0..weeks)
        .map(|i| {
            json!({
                "date": format!("2021-W{:02}", i + 1),
                "log_weekly_cases": 7.0 + i as f64 * 0.1,
                "avg_reproduction_rate": 1.1,
                "weeks_since_start": i as f64
            })
        })
        .collect()
}

pub fn catalog(entries: &[(&str, &str, usize)]) -> Catalog {
    let raw: Vec<Value> = entries
        .iter()
        .map(|(disease, location, weeks)| {
            json!({ "disease": disease, "location": location, "history": history(*weeks) })
        })
        .collect();
    Catalog::from_json_str(&Value::Array(raw).to_string()).expect("fixture catalog must index")
}

pub fn prediction_body(mortality_pct: f64, r0: f64) -> Value {
    json!({
        "status": "success",
        "disease": "Flu",
        "location": "ParisRegion",
        "predictions": {
            "mortality_rate": { "value": mortality_pct, "unit": "percentage", "description": "Predicted mortality rate" },
            "transmission_rate": { "value": r0, "unit": "R0", "description": "Predicted transmission rate" },
            "spatial_spread": { "value": 0.4, "unit": "correlation", "description": "Spatial spread (unreliable)" }
        },
        "metadata": {
            "warning": null,
            "model_version": "1.0",
            "prediction_horizon": "4 weeks",
            "confidence": "high"
        }
    })
}
