//! Prometheus metrics definitions for the progression predictor
//!
//! All metrics use the `diabetes_predictor_` prefix.

use crate::domain::ml::Interpretation;
use prometheus::{
    CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, GenericGauge},
};
use std::sync::Arc;

pub const REJECTION_VALIDATION: &str = "validation";
pub const REJECTION_INFERENCE: &str = "inference";

/// Prometheus metrics for the inference service
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,
    /// Successful predictions by interpretation band
    pub predictions_total: CounterVec,
    /// Rejected requests by reason
    pub rejected_requests_total: CounterVec,
    /// Prediction latency (validation and inference) in seconds
    pub prediction_latency_seconds: HistogramVec,
    /// Uptime in seconds
    pub uptime_seconds: GenericGauge<AtomicF64>,
}

impl Metrics {
    /// Create a new Metrics instance with all gauges and counters registered
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let predictions_total = CounterVec::new(
            Opts::new(
                "diabetes_predictor_predictions_total",
                "Successful predictions by interpretation band",
            ),
            &["interpretation"],
        )?;
        registry.register(Box::new(predictions_total.clone()))?;

        let rejected_requests_total = CounterVec::new(
            Opts::new(
                "diabetes_predictor_rejected_requests_total",
                "Prediction requests that failed, by reason",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(rejected_requests_total.clone()))?;

        let prediction_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "diabetes_predictor_prediction_latency_seconds",
                "Prediction request latency (validation and inference) in seconds",
            )
            .buckets(vec![
                0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.5,
            ]),
            &["estimator"],
        )?;
        registry.register(Box::new(prediction_latency_seconds.clone()))?;

        let uptime_seconds = Gauge::with_opts(Opts::new(
            "diabetes_predictor_uptime_seconds",
            "Server uptime in seconds",
        ))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            predictions_total,
            rejected_requests_total,
            prediction_latency_seconds,
            uptime_seconds,
        })
    }

    /// Render all metrics in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    pub fn inc_predictions(&self, interpretation: Interpretation) {
        self.predictions_total
            .with_label_values(&[interpretation.as_str()])
            .inc();
    }

    pub fn inc_rejected(&self, reason: &str) {
        self.rejected_requests_total
            .with_label_values(&[reason])
            .inc();
    }

    pub fn observe_prediction_latency(&self, estimator: &str, latency: f64) {
        self.prediction_latency_seconds
            .with_label_values(&[estimator])
            .observe(latency);
    }

    pub fn predictions_count(&self, interpretation: Interpretation) -> u64 {
        self.predictions_total
            .with_label_values(&[interpretation.as_str()])
            .get() as u64
    }

    pub fn rejected_count(&self, reason: &str) -> u64 {
        self.rejected_requests_total
            .with_label_values(&[reason])
            .get() as u64
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new().expect("Failed to create default Metrics")
    }
}
