pub mod charts;
pub mod commands;
pub mod core;
pub mod error;
pub mod inference;
pub mod models;

pub use crate::core::catalog::{build_catalog, Catalog};
pub use crate::core::config::{DashboardSettings, LocationSelection};
pub use crate::core::dashboard::{Dashboard, DashboardView};
pub use crate::error::{CatalogError, PredictionError, TransportError, ValidationError};
pub use crate::inference::{HttpInferenceService, InferenceService, PredictionClient};

/// Install the `env_logger` backend. Defaults to `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();
}

/// Entry point shared by the binaries.
pub async fn run() -> anyhow::Result<()> {
    use clap::Parser;

    init_logging();
    let cli = commands::Cli::parse();
    commands::run(cli).await
}
