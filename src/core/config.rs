use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const ENV_API_URL: &str = "EPIDASH_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "EPIDASH_TIMEOUT_SECS";
pub const ENV_CATALOG: &str = "EPIDASH_CATALOG";
pub const ENV_LOCATION: &str = "EPIDASH_LOCATION";

/// Which location of a disease gets queried when its button is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationSelection {
    /// First location in catalog insertion order.
    #[default]
    FirstInserted,
    Named(String),
}

impl LocationSelection {
    /// Empty or missing names fall back to `FirstInserted`.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => LocationSelection::Named(n.to_string()),
            _ => LocationSelection::FirstInserted,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub catalog_path: PathBuf,
    pub location_selection: LocationSelection,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            api_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            catalog_path: PathBuf::from("data/disease.json"),
            location_selection: LocationSelection::FirstInserted,
        }
    }
}

impl DashboardSettings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = DashboardSettings::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            settings.api_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            settings.request_timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, raw))?;
        }
        if let Some(path) = lookup(ENV_CATALOG).filter(|v| !v.trim().is_empty()) {
            settings.catalog_path = PathBuf::from(path);
        }
        settings.location_selection = LocationSelection::from_name(lookup(ENV_LOCATION).as_deref());

        settings.api_url = normalize_base_url(&settings.api_url);
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Strip trailing slashes so endpoint paths can be appended with `format!`.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
