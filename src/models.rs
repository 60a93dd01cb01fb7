use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum number of weekly records the inference model needs.
pub const MIN_HISTORY_LEN: usize = 12;

/// One weekly observation for a disease at a location.
///
/// Besides the optional `date`, the record is opaque: model features
/// (`log_weekly_cases`, `avg_reproduction_rate`, ...) sit next to metadata such
/// as `epidemic_phase`. Field order and values are kept so the record
/// serializes back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub features: IndexMap<String, Value>,
}

impl HistoryRecord {
    /// Numeric value of a feature. Text and missing fields yield `None`.
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).and_then(Value::as_f64)
    }
}

/// Raw catalog entry as found in the static JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryRecord>,
}

/// The catalog file holds either one record or an array of them.
#[derive(Debug, Clone)]
pub enum CatalogInput {
    Many(Vec<CatalogRecord>),
    One(CatalogRecord),
}

impl CatalogInput {
    pub fn into_records(self) -> Vec<CatalogRecord> {
        match self {
            CatalogInput::Many(records) => records,
            CatalogInput::One(record) => vec![record],
        }
    }
}

// Decoded by shape so a bad field reports its own error instead of a generic
// "no variant matched".
impl<'de> Deserialize<'de> for CatalogInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if raw.is_array() {
            serde_json::from_value(raw)
                .map(CatalogInput::Many)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(raw)
                .map(CatalogInput::One)
                .map_err(de::Error::custom)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub disease: String,
    pub location: String,
    pub history: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPredictionRequest<'a> {
    pub predictions: &'a [PredictionRequest],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Success,
    #[serde(untagged)]
    Other(String),
}

impl PredictionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionStatus::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub mortality_rate: Metric,
    pub transmission_rate: Metric,
    pub spatial_spread: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetadata {
    #[serde(default)]
    pub warning: Option<String>,
    pub model_version: String,
    pub prediction_horizon: String,
    pub confidence: String,
}

/// A prediction as returned by `POST /predict`.
///
/// Values reaching the chart layer have passed boundary validation, so
/// `predictions.mortality_rate` is always expressed as a fraction (unit
/// `"fraction"`) for successful results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: PredictionStatus,
    pub disease: String,
    pub location: String,
    pub predictions: Predictions,
    pub metadata: PredictionMetadata,
}

impl PredictionResult {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn mortality_fraction(&self) -> f64 {
        self.predictions.mortality_rate.value
    }

    pub fn transmission_rate(&self) -> f64 {
        self.predictions.transmission_rate.value
    }

    pub fn spatial_spread(&self) -> f64 {
        self.predictions.spatial_spread.value
    }
}

/// Payload of `GET /health`. Only reachability matters, the body is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiHealth(pub Value);

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub endpoints: IndexMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Checking,
    Online,
    Offline,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Checking => "checking...",
            HealthStatus::Online => "online",
            HealthStatus::Offline => "offline",
        }
    }
}
