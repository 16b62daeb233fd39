//! Input form shared by the client front-ends.
//!
//! Collects the ten raw text entries a user typed and turns them into a
//! `FeatureRecord`, reporting every field that is empty or not a number.

use crate::domain::errors::ClientError;
use crate::domain::ml::{FEATURE_COUNT, FEATURE_ORDER, Feature, FeatureRecord, PredictionResult};

#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    entries: [Option<String>; FEATURE_COUNT],
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, feature: Feature, raw: impl Into<String>) {
        self.entries[index_of(feature)] = Some(raw.into());
    }

    pub fn get(&self, feature: Feature) -> Option<&str> {
        self.entries[index_of(feature)].as_deref()
    }

    /// Features that have not been filled in yet, in form order
    pub fn missing(&self) -> Vec<Feature> {
        FEATURE_ORDER
            .iter()
            .zip(&self.entries)
            .filter(|(_, entry)| entry.is_none())
            .map(|(feature, _)| *feature)
            .collect()
    }

    pub fn parse(&self) -> Result<FeatureRecord, ClientError> {
        let mut values = [0.0; FEATURE_COUNT];
        let mut invalid = Vec::new();

        for ((slot, feature), entry) in values.iter_mut().zip(FEATURE_ORDER).zip(&self.entries) {
            match entry.as_deref().and_then(parse_number) {
                Some(v) => *slot = v,
                None => invalid.push(feature.label()),
            }
        }

        if invalid.is_empty() {
            Ok(FeatureRecord::from_ordered(values))
        } else {
            Err(ClientError::Form { fields: invalid })
        }
    }
}

fn index_of(feature: Feature) -> usize {
    FEATURE_ORDER
        .iter()
        .position(|f| *f == feature)
        .unwrap_or_default()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text shown to the user after a successful prediction
pub fn render_result(result: &PredictionResult) -> String {
    format!(
        "Predicted Diabetes Progression Score: {:.2} ({})",
        result.score, result.interpretation
    )
}
