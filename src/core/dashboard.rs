use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::charts::{prediction_summary, render_charts, DashboardCharts, PredictionSummary};
use crate::core::catalog::Catalog;
use crate::error::{CatalogError, PredictionError};
use crate::inference::{InferenceService, PredictionClient};
use crate::models::{HealthStatus, PredictionResult};

pub const NO_DATA_MESSAGE: &str = "No diseases found or data is invalid.";
pub const LOADING_LABEL: &str = "Loading...";

/// Owns the dashboard state and hands immutable snapshots to the renderer.
///
/// The current prediction and the API status are single slots replaced
/// atomically. A late response still overwrites a newer one: last write wins.
pub struct Dashboard<S> {
    client: PredictionClient<S>,
    catalog: Catalog,
    catalog_error: Option<String>,
    health: watch::Sender<HealthStatus>,
    current: watch::Sender<Option<Arc<PredictionResult>>>,
    loading: watch::Sender<Option<String>>,
    in_flight: watch::Sender<usize>,
    active: watch::Sender<Option<String>>,
    last_error: watch::Sender<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiseaseButton {
    pub disease: String,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub api_status: HealthStatus,
    pub api_status_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub buttons: Vec<DiseaseButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PredictionSummary>,
    pub charts: DashboardCharts,
}

impl<S: InferenceService> Dashboard<S> {
    /// A catalog that failed to load degrades to an empty dashboard with a notice.
    pub fn new(client: PredictionClient<S>, catalog: Result<Catalog, CatalogError>) -> Self {
        let (catalog, catalog_error) = match catalog {
            Ok(c) if c.is_empty() => (c, Some(NO_DATA_MESSAGE.to_string())),
            Ok(c) => (c, None),
            Err(e) => {
                warn!("Catalog unavailable, rendering empty state: {}", e);
                (Catalog::default(), Some(NO_DATA_MESSAGE.to_string()))
            }
        };

        Self {
            client,
            catalog,
            catalog_error,
            health: watch::channel(HealthStatus::Checking).0,
            current: watch::channel(None).0,
            loading: watch::channel(None).0,
            in_flight: watch::channel(0).0,
            active: watch::channel(None).0,
            last_error: watch::channel(None).0,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn client(&self) -> &PredictionClient<S> {
        &self.client
    }

    pub fn health(&self) -> HealthStatus {
        *self.health.borrow()
    }

    pub fn subscribe_health(&self) -> watch::Receiver<HealthStatus> {
        self.health.subscribe()
    }

    pub fn current(&self) -> Option<Arc<PredictionResult>> {
        self.current.borrow().clone()
    }

    pub fn subscribe_result(&self) -> watch::Receiver<Option<Arc<PredictionResult>>> {
        self.current.subscribe()
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Disease of the most recent click that is still pending.
    pub fn loading(&self) -> Option<String> {
        self.loading.borrow().clone()
    }

    /// Number of predictions currently awaiting a response.
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Probe the API once. The indicator leaves `Checking` and never returns to it.
    pub async fn probe_health(&self) -> HealthStatus {
        let status = match self.client.check_health().await {
            Ok(health) => {
                info!("API health: {}", health.0);
                HealthStatus::Online
            }
            Err(e) => {
                error!("API is offline: {}", e);
                HealthStatus::Offline
            }
        };

        self.health.send_if_modified(|current| {
            if *current == HealthStatus::Checking {
                *current = status;
                true
            } else {
                false
            }
        });
        self.health()
    }

    /// Handle a click on a disease button.
    ///
    /// Errors are recorded as a user-facing message and also returned. The
    /// current result is only replaced on success. Buttons stay disabled until
    /// every outstanding request has settled.
    pub async fn select_disease(&self, disease: &str) -> Result<Arc<PredictionResult>, PredictionError> {
        self.loading.send_replace(Some(disease.to_string()));
        self.in_flight.send_modify(|n| *n += 1);
        self.active.send_replace(Some(disease.to_string()));
        self.last_error.send_replace(None);

        let outcome = self.client.request_prediction(&self.catalog, disease).await;

        let outcome = match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.current.send_replace(Some(Arc::clone(&result)));
                Ok(result)
            }
            Err(e) => {
                error!("Prediction for {} failed: {}", disease, e);
                self.last_error.send_replace(Some(e.user_message()));
                Err(e)
            }
        };

        self.in_flight.send_modify(|n| *n = n.saturating_sub(1));
        self.loading.send_if_modified(|loading| {
            if loading.as_deref() == Some(disease) {
                *loading = None;
                true
            } else {
                false
            }
        });
        outcome
    }

    pub fn buttons(&self) -> Vec<DiseaseButton> {
        let loading = self.loading.borrow().clone();
        let busy = self.in_flight() > 0;
        let active = self.active.borrow().clone();

        self.catalog
            .diseases()
            .map(|disease| {
                let is_loading = loading.as_deref() == Some(disease);
                DiseaseButton {
                    disease: disease.to_string(),
                    label: if is_loading { LOADING_LABEL.to_string() } else { disease.to_string() },
                    active: active.as_deref() == Some(disease),
                    disabled: busy,
                }
            })
            .collect()
    }

    pub fn view(&self) -> DashboardView {
        let current = self.current();
        let result = current.as_deref();
        let status = self.health();

        DashboardView {
            generated_at: Utc::now(),
            api_status: status,
            api_status_label: status.label(),
            notice: self.catalog_error.clone(),
            buttons: self.buttons(),
            error: self.last_error(),
            summary: prediction_summary(result),
            charts: render_charts(result),
        }
    }
}

impl<S: InferenceService + 'static> Dashboard<S> {
    /// Run the startup probe in the background so rendering does not wait on it.
    pub fn spawn_health_probe(self: &Arc<Self>) -> JoinHandle<HealthStatus> {
        let dashboard = Arc::clone(self);
        tokio::spawn(async move { dashboard.probe_health().await })
    }
}
