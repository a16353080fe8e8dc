//! Churn Predictor - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig, AppState};
use inference_engine::ModelArtifacts;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Churn Predictor v{} ===", env!("CARGO_PKG_VERSION"));

    let artifacts = ModelArtifacts::load(&config.artifacts)
        .context("failed to load model artifacts; refusing to serve")?;
    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("failed to install metrics recorder")?;

    let state = Arc::new(AppState::new(artifacts, config.validation.clone()).with_metrics(metrics));
    run_server(&config.server, state).await?;

    Ok(())
}
