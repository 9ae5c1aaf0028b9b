//! Prediction result types.
//!
//! Represents the output of the risk classification: a probability and
//! the discrete risk level derived from the decision threshold.

use serde::{Deserialize, Serialize};

/// Risk level classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Low risk of heart disease
    Low,
    /// High risk, intervention recommended
    High,
}

impl RiskLevel {
    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - Routine maintenance recommended",
            Self::High => "High risk - Cardiologist referral advised",
        }
    }

    /// Recommendation lines shown with the result.
    ///
    /// Selected purely from the risk level; the literal text is
    /// presentation detail.
    #[must_use]
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            Self::High => &[
                "Schedule an appointment with a cardiologist for detailed evaluation",
                "Monitor blood pressure and cholesterol levels regularly",
                "Consider lifestyle modifications including diet and exercise",
            ],
            Self::Low => &[
                "Maintain regular health check-ups",
                "Continue healthy lifestyle habits",
                "Stay physically active",
            ],
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// Probability cutoff above which risk is classified HIGH.
///
/// Recognized open range (0, 1); the comparison is strict, so a
/// probability exactly equal to the threshold yields LOW.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionThreshold(f64);

impl DecisionThreshold {
    /// Default cutoff matching the deployed model's operating point.
    pub const DEFAULT: Self = Self(0.7);

    /// Create a threshold, rejecting values outside (0, 1).
    ///
    /// # Errors
    /// Returns a message naming the offending value.
    pub fn new(value: f64) -> Result<Self, String> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(format!("Threshold {value} outside recognized range (0, 1)"))
        }
    }

    /// The raw cutoff value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Classify a probability against this threshold.
    #[must_use]
    pub fn classify(&self, probability: f64) -> RiskLevel {
        if probability > self.0 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }
}

impl Default for DecisionThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of one risk classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Positive-class probability as a percentage (0.0 to 100.0)
    pub probability_percent: f64,

    /// Risk classification against the decision threshold
    pub risk_level: RiskLevel,

    /// Timestamp of evaluation (display metadata only)
    pub evaluated_at: chrono::DateTime<chrono::Utc>,
}

impl PredictionResult {
    /// Derive a result from a raw probability and the active threshold.
    #[must_use]
    pub fn from_probability(probability: f64, threshold: DecisionThreshold) -> Self {
        Self {
            probability_percent: probability * 100.0,
            risk_level: threshold.classify(probability),
            evaluated_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_comparison_is_strict() {
        let threshold = DecisionThreshold::new(0.7).expect("valid threshold");
        assert_eq!(threshold.classify(0.7), RiskLevel::Low);
        assert_eq!(threshold.classify(0.7000001), RiskLevel::High);
    }

    #[test]
    fn test_risk_is_monotonic_in_probability() {
        let threshold = DecisionThreshold::default();
        let mut previous = RiskLevel::Low;
        for i in 0..=100 {
            let level = threshold.classify(f64::from(i) / 100.0);
            assert!(
                !(previous == RiskLevel::High && level == RiskLevel::Low),
                "risk level dropped as probability rose"
            );
            previous = level;
        }
    }

    #[test]
    fn test_threshold_rejects_out_of_range() {
        assert!(DecisionThreshold::new(0.0).is_err());
        assert!(DecisionThreshold::new(1.0).is_err());
        assert!(DecisionThreshold::new(-0.2).is_err());
        assert!(DecisionThreshold::new(f64::NAN).is_err());
        assert!(DecisionThreshold::new(0.5).is_ok());
    }

    #[test]
    fn test_result_from_probability() {
        let result = PredictionResult::from_probability(0.85, DecisionThreshold::default());
        assert!((result.probability_percent - 85.0).abs() < 1e-9);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_recommendations_follow_risk_level() {
        assert!(RiskLevel::High.recommendations()[0].contains("cardiologist"));
        assert!(RiskLevel::Low.recommendations()[0].contains("check-ups"));
    }
}
