use anyhow::Result;
use serde::Serialize;

use crate::core::config::DashboardSettings;
use crate::inference::{HttpInferenceService, InferenceService};
use crate::models::HealthStatus;

#[derive(Debug, Serialize)]
pub struct ConnectionTestResult {
    pub status: HealthStatus,
    pub message: String,
}

/// Probe failures are reported, not returned as errors.
pub async fn health(settings: &DashboardSettings) -> Result<()> {
    let service = HttpInferenceService::from_settings(settings);

    let result = match service.health().await {
        Ok(health) => ConnectionTestResult {
            status: HealthStatus::Online,
            message: health.0.to_string(),
        },
        Err(e) => ConnectionTestResult {
            status: HealthStatus::Offline,
            message: format!("{} is not reachable: {}", service.base_url(), e),
        },
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub async fn info(settings: &DashboardSettings) -> Result<()> {
    let service = HttpInferenceService::from_settings(settings);
    let info = service.service_info().await?;

    println!("{} (v{})", info.message, info.version);
    for (endpoint, description) in &info.endpoints {
        println!("  {:<16} {}", endpoint, description);
    }
    Ok(())
}
