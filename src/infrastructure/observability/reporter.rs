//! Push-based metrics reporter
//!
//! Periodically outputs metrics as structured JSON to stdout.

use crate::domain::ml::Interpretation;
use crate::infrastructure::observability::metrics::{
    Metrics, REJECTION_INFERENCE, REJECTION_VALIDATION,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Metrics snapshot for JSON output
#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub model: String,
    pub predictions: PredictionCounts,
    pub rejections: RejectionCounts,
}

#[derive(Debug, Serialize)]
pub struct PredictionCounts {
    pub below_average: u64,
    pub average: u64,
    pub above_average: u64,
}

#[derive(Debug, Serialize)]
pub struct RejectionCounts {
    pub validation: u64,
    pub inference: u64,
}

/// Push-based metrics reporter
///
/// Outputs metrics as structured JSON logs on a configurable interval.
pub struct MetricsReporter {
    metrics: Metrics,
    model_id: String,
    start_time: Instant,
    interval: Duration,
}

impl MetricsReporter {
    pub fn new(metrics: Metrics, model_id: impl Into<String>, interval_seconds: u64) -> Self {
        Self {
            metrics,
            model_id: model_id.into(),
            start_time: Instant::now(),
            interval: Duration::from_secs(interval_seconds),
        }
    }

    /// Run the reporter in a loop, outputting metrics periodically
    pub async fn run(self) {
        info!(
            "MetricsReporter: Starting push-based metrics (interval: {:?})",
            self.interval
        );

        loop {
            tokio::time::sleep(self.interval).await;

            let snapshot = self.collect_snapshot();
            match serde_json::to_string(&snapshot) {
                Ok(json) => {
                    // Use a special prefix so logs can be easily filtered
                    println!("METRICS_JSON:{}", json);
                    info!(
                        "Predictions: {} | Rejected: {} | Uptime: {}s",
                        snapshot.predictions.total(),
                        snapshot.rejections.validation + snapshot.rejections.inference,
                        snapshot.uptime_seconds
                    );
                }
                Err(e) => warn!("Failed to serialize metrics: {}", e),
            }
            debug!("Prometheus exposition:\n{}", self.metrics.render());
        }
    }

    /// Collect current metrics snapshot
    pub fn collect_snapshot(&self) -> MetricsSnapshot {
        let uptime = self.start_time.elapsed().as_secs();
        self.metrics.uptime_seconds.set(uptime as f64);

        MetricsSnapshot {
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: self.model_id.clone(),
            predictions: PredictionCounts {
                below_average: self.metrics.predictions_count(Interpretation::BelowAverage),
                average: self.metrics.predictions_count(Interpretation::Average),
                above_average: self.metrics.predictions_count(Interpretation::AboveAverage),
            },
            rejections: RejectionCounts {
                validation: self.metrics.rejected_count(REJECTION_VALIDATION),
                inference: self.metrics.rejected_count(REJECTION_INFERENCE),
            },
        }
    }
}

impl PredictionCounts {
    pub fn total(&self) -> u64 {
        self.below_average + self.average + self.above_average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot_collection() {
        let metrics = Metrics::new().expect("Failed to create metrics");
        metrics.inc_predictions(Interpretation::BelowAverage);
        metrics.inc_rejected(REJECTION_VALIDATION);
        let reporter = MetricsReporter::new(metrics, "diabetes_progression_v1", 60);

        let snapshot = reporter.collect_snapshot();

        assert_eq!(snapshot.predictions.below_average, 1);
        assert_eq!(snapshot.predictions.total(), 1);
        assert_eq!(snapshot.rejections.validation, 1);
        assert!(!snapshot.timestamp.is_empty());
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = MetricsSnapshot {
            timestamp: "2026-01-10T10:00:00Z".to_string(),
            uptime_seconds: 3600,
            version: "1.0.0".to_string(),
            model: "diabetes_progression_v1".to_string(),
            predictions: PredictionCounts {
                below_average: 3,
                average: 5,
                above_average: 2,
            },
            rejections: RejectionCounts {
                validation: 4,
                inference: 0,
            },
        };

        let json = serde_json::to_string(&snapshot).expect("Failed to serialize");
        assert!(json.contains("diabetes_progression_v1"));
        assert!(json.contains("\"average\":5"));
    }
}
