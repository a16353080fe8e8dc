//! Churn Prediction API Server
//!
//! Serves the customer form, the JSON prediction endpoint, health and
//! Prometheus metrics over the fitted churn model.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use feature_engine::{FeaturePipeline, ValidationConfig, Validator, FEATURE_DIMENSION};
use inference_engine::{InferenceEngine, ModelArtifacts};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_governor::GovernorLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod config;
mod error;
pub mod rate_limit;
mod render;
mod routes;

pub use config::{AppConfig, LoggingConfig, ServerConfig};
pub use error::{ApiError, ServerError};
pub use rate_limit::RateLimitConfig;

/// Application state shared read-only across handlers
pub struct AppState {
    /// Fitted encoders and scaler
    pub pipeline: FeaturePipeline,
    /// Fitted classifier
    pub engine: InferenceEngine,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus exporter, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new application state from loaded artifacts
    pub fn new(artifacts: ModelArtifacts, validation: ValidationConfig) -> Self {
        let ModelArtifacts {
            model,
            scaler,
            encoders,
        } = artifacts;

        Self {
            pipeline: FeaturePipeline::new(encoders, scaler)
                .with_validator(Validator::new(validation)),
            engine: InferenceEngine::new(model),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for the /metrics endpoint
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub model: ModelInfo,
}

/// Loaded model summary
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub scaler: String,
    pub feature_count: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::form::index).post(routes::form::submit))
        .route("/api/v1/predict", post(routes::predict::predict))
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        model: ModelInfo {
            kind: state.engine.model_kind().to_string(),
            scaler: state.pipeline.scaler().method().to_string(),
            feature_count: FEATURE_DIMENSION,
        },
    })
}

/// Prometheus exposition
async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::NOT_FOUND,
            "metrics recorder not installed".to_string(),
        ),
    }
}

/// Initialize logging
pub fn init_logging(config: &LoggingConfig) -> Result<(), ServerError> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| ServerError::Logging(format!("unknown log level {:?}", config.level)))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    installed.map_err(|e| ServerError::Logging(e.to_string()))
}

/// Serve the application on an already bound listener
pub async fn serve(
    listener: TcpListener,
    state: Arc<AppState>,
    config: &ServerConfig,
) -> Result<(), ServerError> {
    let mut app = create_router(state);

    if config.rate_limit.enabled {
        let governor = rate_limit::create_governor_config(&config.rate_limit)?;
        app = app.layer(GovernorLayer { config: governor });
        info!(
            "Rate limiting enabled: burst={}, replenish every {}s",
            config.rate_limit.burst_size, config.rate_limit.per_second
        );
    }

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Bind the configured address and run the server
pub async fn run_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Starting API server on {}", config.bind_addr);

    serve(listener, state, config).await
}
