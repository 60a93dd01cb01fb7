use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use crate::core::catalog::Catalog;
use crate::core::config::DashboardSettings;
use crate::core::dashboard::Dashboard;
use crate::inference::{HttpInferenceService, PredictionClient};

fn client(settings: &DashboardSettings) -> PredictionClient<HttpInferenceService> {
    PredictionClient::new(HttpInferenceService::from_settings(settings))
        .with_selection(settings.location_selection.clone())
}

/// Load the catalog, probe the API in the background, run one optional
/// prediction and print the resulting frame.
pub async fn view(settings: &DashboardSettings, disease: Option<&str>) -> Result<()> {
    let catalog = Catalog::load(&settings.catalog_path);
    let dashboard = Arc::new(Dashboard::new(client(settings), catalog));

    // 1. Startup probe, not awaited before the first interaction
    let probe = dashboard.spawn_health_probe();

    // 2. Simulated click. Failures end up in the view's `error` field.
    if let Some(disease) = disease {
        if let Err(e) = dashboard.select_disease(disease).await {
            info!("Selection of {} did not produce a prediction: {}", disease, e);
        }
    }

    probe.await.context("health probe task panicked")?;

    let view = dashboard.view();
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub async fn batch(settings: &DashboardSettings, diseases: &[String]) -> Result<()> {
    let catalog = Catalog::load(&settings.catalog_path)
        .with_context(|| format!("failed to load catalog {}", settings.catalog_path.display()))?;
    let client = client(settings);

    let requests = diseases
        .iter()
        .map(|d| client.build_request(&catalog, d))
        .collect::<Result<Vec<_>, _>>()?;

    let response = client.predict_batch(&requests).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
