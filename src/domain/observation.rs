//! Clinical observation types for heart disease risk prediction.
//!
//! One `ClinicalObservation` is built per prediction request from the
//! current form state, encoded once, and discarded.

use serde::{Deserialize, Serialize};

/// Patient sex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Numeric encoding the classifier was trained on.
    #[must_use]
    pub fn encoded(self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }

    /// Human-readable label for form display.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub const ALL: [Self; 2] = [Self::Male, Self::Female];
}

/// Chest pain type as recorded during examination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChestPainType {
    TypicalAngina,
    AtypicalAngina,
    NonAnginalPain,
    Asymptomatic,
}

impl ChestPainType {
    #[must_use]
    pub fn encoded(self) -> f64 {
        match self {
            Self::TypicalAngina => 1.0,
            Self::AtypicalAngina => 2.0,
            Self::NonAnginalPain => 3.0,
            Self::Asymptomatic => 4.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TypicalAngina => "Typical angina",
            Self::AtypicalAngina => "Atypical angina",
            Self::NonAnginalPain => "Non-anginal pain",
            Self::Asymptomatic => "Asymptomatic",
        }
    }

    pub const ALL: [Self; 4] = [
        Self::TypicalAngina,
        Self::AtypicalAngina,
        Self::NonAnginalPain,
        Self::Asymptomatic,
    ];
}

/// Resting electrocardiogram result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestingEcg {
    Normal,
    StTAbnormality,
    LeftVentricularHypertrophy,
}

impl RestingEcg {
    #[must_use]
    pub fn encoded(self) -> f64 {
        match self {
            Self::Normal => 0.0,
            Self::StTAbnormality => 1.0,
            Self::LeftVentricularHypertrophy => 2.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::StTAbnormality => "ST-T wave abnormality",
            Self::LeftVentricularHypertrophy => "Left ventricular hypertrophy",
        }
    }

    pub const ALL: [Self; 3] = [
        Self::Normal,
        Self::StTAbnormality,
        Self::LeftVentricularHypertrophy,
    ];
}

/// Slope of the peak exercise ST segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StSlope {
    Upsloping,
    Flat,
    Downsloping,
}

impl StSlope {
    #[must_use]
    pub fn encoded(self) -> f64 {
        match self {
            Self::Upsloping => 1.0,
            Self::Flat => 2.0,
            Self::Downsloping => 3.0,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Upsloping => "Upsloping",
            Self::Flat => "Flat",
            Self::Downsloping => "Downsloping",
        }
    }

    pub const ALL: [Self; 3] = [Self::Upsloping, Self::Flat, Self::Downsloping];
}

/// One clinical measurement record, as collected by the input form.
///
/// Immutable once built; discarded after a single prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalObservation {
    /// Age in years (20-80)
    pub age: u32,

    /// Patient sex
    pub sex: Sex,

    /// Chest pain type
    pub chest_pain_type: ChestPainType,

    /// Resting systolic blood pressure in mmHg (60-200)
    pub resting_bp: u32,

    /// Serum cholesterol in mg/dl (60-600)
    pub cholesterol: u32,

    /// Fasting blood sugar above 120 mg/dl
    pub fasting_blood_sugar_high: bool,

    /// Resting ECG result
    pub resting_ecg: RestingEcg,

    /// Maximum heart rate achieved (60-220)
    pub max_heart_rate: u32,

    /// Exercise-induced angina
    pub exercise_induced_angina: bool,

    /// ST depression induced by exercise relative to rest (0.0-6.0)
    pub oldpeak: f64,

    /// ST slope at peak exercise
    pub st_slope: StSlope,
}

impl ClinicalObservation {
    /// Encode the observation into the feature vector the classifier
    /// was trained on.
    ///
    /// Pure and total: every enum maps through an exhaustive table and
    /// numeric fields pass through unchanged. Performs no range
    /// validation; that belongs to the input surface.
    #[must_use]
    pub fn encode(&self) -> FeatureVector {
        FeatureVector([
            f64::from(self.age),
            self.sex.encoded(),
            self.chest_pain_type.encoded(),
            f64::from(self.resting_bp),
            f64::from(self.cholesterol),
            if self.fasting_blood_sugar_high { 1.0 } else { 0.0 },
            self.resting_ecg.encoded(),
            f64::from(self.max_heart_rate),
            if self.exercise_induced_angina { 1.0 } else { 0.0 },
            self.oldpeak,
            self.st_slope.encoded(),
        ])
    }

    /// Validate that all numeric fields are within expected ranges.
    ///
    /// Enum fields need no checking: out-of-domain values are
    /// unrepresentable.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(20..=80).contains(&self.age) {
            errors.push(format!("Age {} out of range [20, 80]", self.age));
        }
        if !(60..=200).contains(&self.resting_bp) {
            errors.push(format!(
                "Resting BP {} out of range [60, 200]",
                self.resting_bp
            ));
        }
        if !(60..=600).contains(&self.cholesterol) {
            errors.push(format!(
                "Cholesterol {} out of range [60, 600]",
                self.cholesterol
            ));
        }
        if !(60..=220).contains(&self.max_heart_rate) {
            errors.push(format!(
                "Max heart rate {} out of range [60, 220]",
                self.max_heart_rate
            ));
        }
        if !(0.0..=6.0).contains(&self.oldpeak) {
            errors.push(format!("Oldpeak {} out of range [0.0, 6.0]", self.oldpeak));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Fixed-order numeric encoding of a clinical observation.
///
/// The field order is a contract with the model artifact and must never
/// be reordered independently of it. `FEATURE_NAMES` is the single
/// source of truth for that order; the artifact loader checks against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; 11]);

impl FeatureVector {
    /// Number of features in the vector.
    pub const LEN: usize = 11;

    /// View the vector in contract order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Feature names in the order the classifier was trained on.
pub const FEATURE_NAMES: [&str; 11] = [
    "age",
    "sex",
    "chest_pain_type",
    "resting_bp",
    "cholesterol",
    "fasting_blood_sugar",
    "resting_ecg",
    "max_heart_rate",
    "exercise_angina",
    "oldpeak",
    "st_slope",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline_observation() -> ClinicalObservation {
        ClinicalObservation {
            age: 40,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::TypicalAngina,
            resting_bp: 120,
            cholesterol: 200,
            fasting_blood_sugar_high: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 150,
            exercise_induced_angina: false,
            oldpeak: 0.0,
            st_slope: StSlope::Upsloping,
        }
    }

    #[test]
    fn test_baseline_encoding() {
        let vector = baseline_observation().encode();
        assert_eq!(
            vector.as_slice(),
            &[40.0, 1.0, 1.0, 120.0, 200.0, 0.0, 0.0, 150.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let obs = baseline_observation();
        assert_eq!(obs.encode(), obs.encode());
    }

    #[test]
    fn test_vector_length_matches_contract() {
        assert_eq!(
            baseline_observation().encode().as_slice().len(),
            FeatureVector::LEN
        );
        assert_eq!(FEATURE_NAMES.len(), FeatureVector::LEN);
    }

    #[test]
    fn test_chest_pain_mapping_table() {
        let codes: Vec<f64> = ChestPainType::ALL.iter().map(|c| c.encoded()).collect();
        assert_eq!(codes, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_resting_ecg_mapping_table() {
        let codes: Vec<f64> = RestingEcg::ALL.iter().map(|e| e.encoded()).collect();
        assert_eq!(codes, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_st_slope_mapping_table() {
        let codes: Vec<f64> = StSlope::ALL.iter().map(|s| s.encoded()).collect();
        assert_eq!(codes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_boolean_and_sex_encodings() {
        let mut obs = baseline_observation();
        obs.sex = Sex::Female;
        obs.fasting_blood_sugar_high = true;
        obs.exercise_induced_angina = true;

        let v = obs.encode();
        assert_eq!(v.as_slice()[1], 0.0);
        assert_eq!(v.as_slice()[5], 1.0);
        assert_eq!(v.as_slice()[8], 1.0);
    }

    #[test]
    fn test_numeric_fields_pass_through() {
        let mut obs = baseline_observation();
        obs.oldpeak = 2.3;
        obs.cholesterol = 412;

        let v = obs.encode();
        assert!((v.as_slice()[9] - 2.3).abs() < f64::EPSILON);
        assert_eq!(v.as_slice()[4], 412.0);
    }

    #[test]
    fn test_validation() {
        assert!(baseline_observation().validate().is_ok());

        let mut invalid = baseline_observation();
        invalid.age = 19;
        invalid.oldpeak = 7.5;
        let errors = invalid.validate().expect_err("should be invalid");
        assert_eq!(errors.len(), 2);
    }
}
