//! Push-based observability for the progression predictor
//!
//! Metrics are recorded in a prometheus registry and pushed as
//! structured JSON logs on an interval. No metrics endpoint is served.

pub mod metrics;
pub mod reporter;

pub use metrics::Metrics;
pub use reporter::MetricsReporter;
