use serde::{Deserialize, Serialize};

/// Lower bound of the average band (inclusive)
pub const AVERAGE_LOWER_BOUND: f64 = 100.0;
/// Lower bound of the above-average band (inclusive)
pub const ABOVE_AVERAGE_LOWER_BOUND: f64 = 150.0;

/// Qualitative band of a progression score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    #[serde(rename = "Below average progression")]
    BelowAverage,
    #[serde(rename = "Average progression")]
    Average,
    #[serde(rename = "Above average progression")]
    AboveAverage,
}

impl Interpretation {
    /// Closed-open bands: `[.., 100)`, `[100, 150)`, `[150, ..]`
    pub fn from_score(score: f64) -> Self {
        if score < AVERAGE_LOWER_BOUND {
            Interpretation::BelowAverage
        } else if score < ABOVE_AVERAGE_LOWER_BOUND {
            Interpretation::Average
        } else {
            Interpretation::AboveAverage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::BelowAverage => "Below average progression",
            Interpretation::Average => "Average progression",
            Interpretation::AboveAverage => "Above average progression",
        }
    }

    /// Short identifier used for metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Interpretation::BelowAverage => "below_average",
            Interpretation::Average => "average",
            Interpretation::AboveAverage => "above_average",
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rounds to 2 decimals, ties to even on the scaled value.
/// Magnitudes too large to scale carry no fractional digits and are returned as is.
pub fn round_score(raw: f64) -> f64 {
    let scaled = raw * 100.0;
    if !scaled.is_finite() {
        return raw;
    }
    scaled.round_ties_even() / 100.0
}

/// Score shown to the user together with its band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub score: f64,
    pub interpretation: Interpretation,
}

impl PredictionResult {
    /// Rounds the raw estimator output and classifies the rounded value
    pub fn from_raw(raw: f64) -> Self {
        let score = round_score(raw);
        Self {
            score,
            interpretation: Interpretation::from_score(score),
        }
    }
}

/// Wire shape of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub predicted_progression_score: f64,
    pub interpretation: Interpretation,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_progression_score: result.score,
            interpretation: result.interpretation,
        }
    }
}

impl From<PredictionResponse> for PredictionResult {
    fn from(response: PredictionResponse) -> Self {
        Self {
            score: response.predicted_progression_score,
            interpretation: response.interpretation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_closed_open() {
        assert_eq!(Interpretation::from_score(99.99), Interpretation::BelowAverage);
        assert_eq!(Interpretation::from_score(100.0), Interpretation::Average);
        assert_eq!(Interpretation::from_score(149.99), Interpretation::Average);
        assert_eq!(Interpretation::from_score(150.0), Interpretation::AboveAverage);
        assert_eq!(Interpretation::from_score(-12.0), Interpretation::BelowAverage);
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(152.13321), 152.13);
        assert_eq!(round_score(-3.14159), -3.14);
        assert_eq!(round_score(100.0), 100.0);
    }

    #[test]
    fn test_round_score_ties_to_even() {
        // 0.125 and 0.375 are exact in binary, so the tie is real
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.375), 0.38);
    }

    #[test]
    fn test_round_score_keeps_huge_magnitudes_finite() {
        assert_eq!(round_score(1.7e308), 1.7e308);
        assert_eq!(round_score(-f64::MAX), -f64::MAX);

        let result = PredictionResult::from_raw(1.7e308);
        assert!(result.score.is_finite());
        assert_eq!(result.interpretation, Interpretation::AboveAverage);
    }

    #[test]
    fn test_classification_uses_rounded_score() {
        // 99.996 rounds up into the average band
        let result = PredictionResult::from_raw(99.996);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.interpretation, Interpretation::Average);

        let result = PredictionResult::from_raw(149.994);
        assert_eq!(result.score, 149.99);
        assert_eq!(result.interpretation, Interpretation::Average);
    }

    #[test]
    fn test_response_serialization() {
        let response = PredictionResponse::from(PredictionResult::from_raw(172.456));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["predicted_progression_score"], 172.46);
        assert_eq!(json["interpretation"], "Above average progression");
    }
}
