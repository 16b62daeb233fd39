pub mod feature_registry;
pub mod prediction;

pub use feature_registry::{
    FEATURE_COUNT, FEATURE_ORDER, Feature, FeatureRecord, FeatureVector, validate_payload,
    vectorize,
};
pub use prediction::{Interpretation, PredictionResponse, PredictionResult};
