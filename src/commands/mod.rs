use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::core::config::{DashboardSettings, LocationSelection};

pub mod predict;
pub mod status;

#[derive(Debug, Parser)]
#[command(name = "epidemic-dashboard", version, about = "Epidemic prediction dashboard")]
pub struct Cli {
    /// Base URL of the inference API (overrides EPIDASH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the disease/location catalog JSON (overrides EPIDASH_CATALOG)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Query this location instead of the first one registered
    #[arg(long, global = true)]
    pub location: Option<String>,

    /// HTTP timeout in seconds (overrides EPIDASH_TIMEOUT_SECS)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the dashboard view as JSON, optionally after selecting a disease
    View {
        #[arg(long)]
        disease: Option<String>,
    },
    /// Probe the inference API health endpoint
    Health,
    /// Show the inference API's endpoint listing
    Info,
    /// Send one batch prediction for several diseases
    Batch {
        #[arg(long = "disease", required = true)]
        diseases: Vec<String>,
    },
}

impl Cli {
    /// Environment first, then command-line overrides.
    pub fn settings(&self) -> Result<DashboardSettings> {
        let mut settings = DashboardSettings::from_env()?;
        if let Some(url) = &self.api_url {
            settings.api_url = crate::core::config::normalize_base_url(url);
        }
        if let Some(path) = &self.catalog {
            settings.catalog_path = path.clone();
        }
        if let Some(location) = &self.location {
            settings.location_selection = LocationSelection::from_name(Some(location));
        }
        if let Some(secs) = self.timeout {
            settings.request_timeout_secs = secs;
        }
        Ok(settings)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings()?;
    log::debug!("Settings: {:?}", settings);

    match cli.command {
        Command::View { disease } => predict::view(&settings, disease.as_deref()).await,
        Command::Health => status::health(&settings).await,
        Command::Info => status::info(&settings).await,
        Command::Batch { diseases } => predict::batch(&settings, &diseases).await,
    }
}
