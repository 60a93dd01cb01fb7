use log::{debug, info, warn};

use super::InferenceService;
use crate::core::catalog::Catalog;
use crate::core::config::LocationSelection;
use crate::error::{PredictionError, TransportError, ValidationError};
use crate::models::{
    ApiHealth, Metric, PredictionRequest, PredictionResult, ServiceInfo, MIN_HISTORY_LEN,
};

pub const FRACTION_UNIT: &str = "fraction";

/// Validates requests against the catalog and normalizes what comes back.
pub struct PredictionClient<S> {
    service: S,
    selection: LocationSelection,
}

impl<S: InferenceService> PredictionClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            selection: LocationSelection::default(),
        }
    }

    pub fn with_selection(mut self, selection: LocationSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn selection(&self) -> &LocationSelection {
        &self.selection
    }

    /// Resolve the location for `disease` and copy its history into a request.
    ///
    /// Fails without touching the network when the disease or location is
    /// unknown, or when fewer than [`MIN_HISTORY_LEN`] records are available.
    pub fn build_request(
        &self,
        catalog: &Catalog,
        disease: &str,
    ) -> Result<PredictionRequest, ValidationError> {
        // 1. Pick the location
        let mut locations = catalog
            .locations(disease)
            .ok_or_else(|| ValidationError::UnknownDisease(disease.to_string()))?;

        let location = match &self.selection {
            LocationSelection::FirstInserted => locations
                .next()
                .ok_or_else(|| ValidationError::UnknownDisease(disease.to_string()))?,
            LocationSelection::Named(name) => locations.find(|l| *l == name.as_str()).ok_or_else(|| {
                ValidationError::UnknownLocation {
                    disease: disease.to_string(),
                    location: name.clone(),
                }
            })?,
        };

        // 2. Look up and check history
        let history = catalog.history(disease, location).unwrap_or_default();
        if history.len() < MIN_HISTORY_LEN {
            return Err(ValidationError::insufficient(disease, location, history.len()));
        }

        Ok(PredictionRequest {
            disease: disease.to_string(),
            location: location.to_string(),
            history: history.to_vec(),
        })
    }

    pub async fn request_prediction(
        &self,
        catalog: &Catalog,
        disease: &str,
    ) -> Result<PredictionResult, PredictionError> {
        let request = self.build_request(catalog, disease).map_err(|e| {
            warn!("Prediction request rejected locally: {}", e);
            e
        })?;

        let raw = self.service.predict(&request).await?;
        debug!("Raw prediction payload from {}: {:?}", self.service.name(), raw);

        let result = validate_result(raw)?;
        info!(
            "Prediction received for {} ({}): R0 {:.3}, mortality {:.4}",
            result.disease,
            result.location,
            result.transmission_rate(),
            result.mortality_fraction()
        );
        Ok(result)
    }

    /// Every entry must satisfy the history minimum before the batch is sent.
    pub async fn predict_batch(
        &self,
        requests: &[PredictionRequest],
    ) -> Result<serde_json::Value, PredictionError> {
        if let Some(short) = requests.iter().find(|r| r.history.len() < MIN_HISTORY_LEN) {
            return Err(ValidationError::insufficient(&short.disease, &short.location, short.history.len()).into());
        }
        Ok(self.service.predict_batch(requests).await?)
    }

    pub async fn check_health(&self) -> Result<ApiHealth, TransportError> {
        self.service.health().await
    }

    pub async fn service_info(&self) -> Result<ServiceInfo, TransportError> {
        self.service.service_info().await
    }
}

/// Convert a mortality metric to a fraction in `[0, 1]` units.
pub fn mortality_to_fraction(metric: &Metric) -> Result<f64, TransportError> {
    match metric.unit.trim().to_lowercase().as_str() {
        "percentage" | "percent" | "%" => Ok(metric.value / 100.0),
        "fraction" | "ratio" => Ok(metric.value),
        other => Err(TransportError::Malformed(format!(
            "unsupported mortality_rate unit {:?}",
            other
        ))),
    }
}

/// Boundary check applied to every payload before it reaches the chart layer.
///
/// Successful results get their mortality rate rewritten as a fraction and
/// must carry finite, non-negative values. Other statuses pass through as-is.
pub fn validate_result(mut raw: PredictionResult) -> Result<PredictionResult, TransportError> {
    if !raw.is_success() {
        warn!("Inference service answered with status {:?}", raw.status);
        return Ok(raw);
    }

    let mortality = mortality_to_fraction(&raw.predictions.mortality_rate)?;
    raw.predictions.mortality_rate.value = mortality;
    raw.predictions.mortality_rate.unit = FRACTION_UNIT.to_string();

    let metrics = [
        ("mortality_rate", &raw.predictions.mortality_rate),
        ("transmission_rate", &raw.predictions.transmission_rate),
        ("spatial_spread", &raw.predictions.spatial_spread),
    ];
    for (name, metric) in metrics {
        if !metric.value.is_finite() || metric.value < 0.0 {
            return Err(TransportError::Malformed(format!(
                "{} must be a finite non-negative number, got {}",
                name, metric.value
            )));
        }
    }

    Ok(raw)
}
