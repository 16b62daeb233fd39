// Prediction serving
pub mod inference_service;

pub use inference_service::{HealthStatus, InferenceService};
