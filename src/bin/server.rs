//! Diabetes Progression Predictor - HTTP inference server
//!
//! Loads the estimator artifact once, then serves `POST /predict` and the
//! `GET /` health probe. Metrics are pushed via structured JSON logs to stdout.
//!
//! # Usage
//! ```sh
//! MODEL_PATH=models/diabetes_model.json cargo run --bin server
//! ```
//!
//! # Environment Variables
//! - `SERVER_HOST` / `SERVER_PORT` - Listener address (default: 0.0.0.0:8000)
//! - `MODEL_PATH` - Estimator artifact (default: models/diabetes_model.json)
//! - `MODEL_FORMAT` - `linear`, `random_forest` or `onnx` (default: from extension)
//! - `MODEL_ID` - Identifier reported by the health probe
//! - `OBSERVABILITY_ENABLED` - Enable metrics reporting (default: true)
//! - `OBSERVABILITY_INTERVAL` - Interval in seconds between metric outputs (default: 60)

use anyhow::{Context, Result};
use diabetes_predictor::application::InferenceService;
use diabetes_predictor::config::Config;
use diabetes_predictor::infrastructure::ml::load_estimator;
use diabetes_predictor::infrastructure::observability::{Metrics, MetricsReporter};
use diabetes_predictor::interfaces::http::{AppState, create_router};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!(
        "Diabetes Progression Predictor {} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: Bind={}, Model={:?}, Format={:?}, Id={}",
        config.server.bind_addr(),
        config.model.model_path,
        config.model.format,
        config.model.model_id
    );

    // The listener is only bound once the estimator is available
    let estimator = load_estimator(&config.model).context("Estimator could not be loaded")?;
    let service = InferenceService::new(estimator, config.model.model_id.clone());
    info!("Estimator ready: {}", service.estimator_name());

    let metrics = Metrics::new()?;

    if config.observability.enabled {
        let reporter = MetricsReporter::new(
            metrics.clone(),
            config.model.model_id.clone(),
            config.observability.interval_seconds,
        );

        tokio::spawn(async move {
            reporter.run().await;
        });

        info!(
            "Metrics reporter started (interval: {}s)",
            config.observability.interval_seconds
        );
    } else {
        info!("Metrics reporting disabled.");
    }

    let state = Arc::new(AppState::new(service, metrics));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr()))?;
    info!("Listening on {}. Press Ctrl+C to shutdown.", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received. Exiting...");
        })
        .await?;

    Ok(())
}
