use crate::domain::errors::{FieldIssue, FieldIssueKind, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FEATURE_COUNT: usize = 10;

/// One physiological input of the progression model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    Sex,
    Bmi,
    BloodPressure,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
}

/// Ordered list of model inputs.
/// This order MUST match exactly the column order the estimator was trained on.
/// Any change here is a breaking change for every model artifact.
pub const FEATURE_ORDER: [Feature; FEATURE_COUNT] = [
    Feature::Age,
    Feature::Sex,
    Feature::Bmi,
    Feature::BloodPressure,
    Feature::S1,
    Feature::S2,
    Feature::S3,
    Feature::S4,
    Feature::S5,
    Feature::S6,
];

impl Feature {
    /// Field name on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Sex => "sex",
            Feature::Bmi => "bmi",
            Feature::BloodPressure => "bp",
            Feature::S1 => "s1",
            Feature::S2 => "s2",
            Feature::S3 => "s3",
            Feature::S4 => "s4",
            Feature::S5 => "s5",
            Feature::S6 => "s6",
        }
    }

    /// Human-readable label for input forms
    pub fn label(&self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::Sex => "Sex",
            Feature::Bmi => "BMI",
            Feature::BloodPressure => "Blood Pressure",
            Feature::S1 => "S1",
            Feature::S2 => "S2",
            Feature::S3 => "S3",
            Feature::S4 => "S4",
            Feature::S5 => "S5",
            Feature::S6 => "S6",
        }
    }
}

/// One patient's measurements.
/// No range constraints apply; values may be raw or standardized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub age: f64,
    pub sex: f64,
    pub bmi: f64,
    /// Average blood pressure
    pub bp: f64,
    /// Serum measurements
    pub s1: f64,
    pub s2: f64,
    pub s3: f64,
    pub s4: f64,
    pub s5: f64,
    pub s6: f64,
}

impl FeatureRecord {
    /// Builds a record from values laid out in `FEATURE_ORDER`
    pub fn from_ordered(values: [f64; FEATURE_COUNT]) -> Self {
        let [age, sex, bmi, bp, s1, s2, s3, s4, s5, s6] = values;
        Self {
            age,
            sex,
            bmi,
            bp,
            s1,
            s2,
            s3,
            s4,
            s5,
            s6,
        }
    }

    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Age => self.age,
            Feature::Sex => self.sex,
            Feature::Bmi => self.bmi,
            Feature::BloodPressure => self.bp,
            Feature::S1 => self.s1,
            Feature::S2 => self.s2,
            Feature::S3 => self.s3,
            Feature::S4 => self.s4,
            Feature::S5 => self.s5,
            Feature::S6 => self.s6,
        }
    }
}

/// Model input in training column order.
/// The fixed-size array makes a wrong length unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// f32 copy for runtimes that take single precision tensors
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.0.iter().map(|v| *v as f32).collect()
    }
}

/// Converts a record into the estimator's input layout
pub fn vectorize(record: &FeatureRecord) -> FeatureVector {
    FeatureVector(FEATURE_ORDER.map(|feature| record.value(feature)))
}

/// Validates an untrusted JSON payload into a `FeatureRecord`.
///
/// Every issue is collected before failing so callers can report all offending
/// fields at once. Unknown keys are ignored.
pub fn validate_payload(payload: &Value) -> Result<FeatureRecord, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;
    validate_object(object)
}

pub fn validate_object(object: &Map<String, Value>) -> Result<FeatureRecord, ValidationError> {
    let mut values = [0.0; FEATURE_COUNT];
    let mut issues = Vec::new();

    for (slot, feature) in values.iter_mut().zip(FEATURE_ORDER) {
        match object.get(feature.name()) {
            None => issues.push(FieldIssue {
                field: feature.name(),
                kind: FieldIssueKind::Missing,
            }),
            Some(raw) => match coerce_number(raw) {
                Some(v) => *slot = v,
                None => issues.push(FieldIssue {
                    field: feature.name(),
                    kind: FieldIssueKind::NotNumeric,
                }),
            },
        }
    }

    if issues.is_empty() {
        Ok(FeatureRecord::from_ordered(values))
    } else {
        Err(ValidationError::InvalidFields { issues })
    }
}

/// Accepts JSON numbers and strings holding a finite decimal number.
/// `null` and booleans are rejected.
fn coerce_number(raw: &Value) -> Option<f64> {
    let value = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> Value {
        json!({
            "age": 59, "sex": 2, "bmi": 32.1, "bp": 101, "s1": 157,
            "s2": 93.2, "s3": 38, "s4": 4, "s5": 4.8598, "s6": 87
        })
    }

    #[test]
    fn test_feature_order_names() {
        let names: Vec<&str> = FEATURE_ORDER.iter().map(|f| f.name()).collect();
        assert_eq!(
            names,
            vec!["age", "sex", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"]
        );
    }

    #[test]
    fn test_vector_follows_feature_order() {
        let record = validate_payload(&sample_payload()).unwrap();
        let vec = vectorize(&record);

        assert_eq!(vec.as_slice().len(), FEATURE_COUNT);
        assert_eq!(
            vec.as_slice(),
            &[59.0, 2.0, 32.1, 101.0, 157.0, 93.2, 38.0, 4.0, 4.8598, 87.0]
        );
    }

    #[test]
    fn test_key_order_in_payload_does_not_matter() {
        let shuffled = json!({
            "s6": 87, "s5": 4.8598, "bp": 101, "age": 59, "s4": 4,
            "s3": 38, "bmi": 32.1, "s2": 93.2, "s1": 157, "sex": 2
        });
        let a = vectorize(&validate_payload(&sample_payload()).unwrap());
        let b = vectorize(&validate_payload(&shuffled).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let mut payload = sample_payload();
        payload["patient_name"] = json!("ignored");
        assert!(validate_payload(&payload).is_ok());
    }

    #[test]
    fn test_missing_field_is_reported() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("s3");

        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFields {
                issues: vec![FieldIssue {
                    field: "s3",
                    kind: FieldIssueKind::Missing
                }]
            }
        );
    }

    #[test]
    fn test_every_offending_field_is_reported() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("sex");
        payload["bmi"] = json!("abc");
        payload["s6"] = Value::Null;

        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["sex", "bmi", "s6"]);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let mut payload = sample_payload();
        payload["bmi"] = json!(" 32.1 ");
        let record = validate_payload(&payload).unwrap();
        assert_eq!(record.bmi, 32.1);
    }

    #[test]
    fn test_booleans_and_non_finite_strings_are_rejected() {
        let mut payload = sample_payload();
        payload["sex"] = json!(true);
        payload["s1"] = json!("NaN");
        payload["s2"] = json!("inf");

        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err.fields(), vec!["sex", "s1", "s2"]);
    }

    #[test]
    fn test_non_object_payload() {
        let err = validate_payload(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err, ValidationError::NotAnObject);
    }

    #[test]
    fn test_negative_values_are_permitted() {
        let mut payload = sample_payload();
        payload["age"] = json!(-0.0382);
        assert_eq!(validate_payload(&payload).unwrap().age, -0.0382);
    }
}
