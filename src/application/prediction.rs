//! Prediction service: Orchestrates one risk classification.
//!
//! Each invocation is stateless and independent: encode the
//! observation, ask the classifier for a probability, apply the
//! decision threshold. No retries, no fallback result.

use std::sync::Arc;

use crate::domain::{ClinicalObservation, DecisionThreshold, PredictionResult};
use crate::ports::Classifier;
use crate::CardioscreenError;

/// Service for running risk classification.
///
/// The classifier is an explicitly injected dependency rather than a
/// process-wide global, so tests can substitute a stub.
pub struct PredictionService<C>
where
    C: Classifier,
{
    classifier: Arc<C>,
    threshold: DecisionThreshold,
}

impl<C> PredictionService<C>
where
    C: Classifier,
{
    /// Create a new prediction service.
    pub fn new(classifier: Arc<C>, threshold: DecisionThreshold) -> Self {
        Self {
            classifier,
            threshold,
        }
    }

    /// The active decision threshold.
    #[must_use]
    pub fn threshold(&self) -> DecisionThreshold {
        self.threshold
    }

    /// Run one risk classification on a clinical observation.
    ///
    /// Fails fast on an out-of-range observation rather than encoding
    /// it: a silently misencoded vector has no visible symptom. A
    /// classifier failure propagates unchanged; this service never
    /// substitutes a default risk level.
    ///
    /// # Errors
    /// Returns error if the observation is out of range or the
    /// classifier cannot produce a probability.
    pub fn predict(
        &self,
        observation: &ClinicalObservation,
    ) -> Result<PredictionResult, CardioscreenError> {
        observation
            .validate()
            .map_err(|errors| CardioscreenError::Validation(errors.join(", ")))?;

        let vector = observation.encode();

        let probability = self.classifier.probability_of_positive_class(&vector)?;

        let result = PredictionResult::from_probability(probability, self.threshold);

        tracing::info!(
            "Prediction complete: probability={:.2}%, risk={}",
            result.probability_percent,
            result.risk_level
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        ChestPainType, FeatureVector, RestingEcg, RiskLevel, Sex, StSlope,
    };
    use crate::ports::ClassifierError;

    /// Stub returning a fixed probability for any vector.
    struct FixedClassifier {
        probability: f64,
    }

    impl Classifier for FixedClassifier {
        fn probability_of_positive_class(
            &self,
            _vector: &FeatureVector,
        ) -> Result<f64, ClassifierError> {
            Ok(self.probability)
        }
    }

    /// Stub that always fails.
    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn probability_of_positive_class(
            &self,
            _vector: &FeatureVector,
        ) -> Result<f64, ClassifierError> {
            Err(ClassifierError::Inference("stub failure".into()))
        }
    }

    fn sample_observation() -> ClinicalObservation {
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

    fn service(probability: f64) -> PredictionService<FixedClassifier> {
        PredictionService::new(
            Arc::new(FixedClassifier { probability }),
            DecisionThreshold::new(0.7).expect("valid threshold"),
        )
    }

    #[test]
    fn test_high_risk_above_threshold() {
        let result = service(0.85)
            .predict(&sample_observation())
            .expect("prediction succeeds");
        assert!((result.probability_percent - 85.0).abs() < 1e-9);
        assert_eq!(result.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_low_risk_below_threshold() {
        let result = service(0.5)
            .predict(&sample_observation())
            .expect("prediction succeeds");
        assert!((result.probability_percent - 50.0).abs() < 1e-9);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_probability_equal_to_threshold_is_low() {
        let result = service(0.7)
            .predict(&sample_observation())
            .expect("prediction succeeds");
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_out_of_range_observation_fails_fast() {
        let mut obs = sample_observation();
        obs.cholesterol = 40;
        let err = service(0.5).predict(&obs).expect_err("must fail fast");
        assert!(matches!(err, CardioscreenError::Validation(_)));
    }

    #[test]
    fn test_classifier_failure_propagates() {
        let svc = PredictionService::new(Arc::new(BrokenClassifier), DecisionThreshold::default());
        let err = svc
            .predict(&sample_observation())
            .expect_err("failure must propagate");
        assert!(matches!(err, CardioscreenError::Classifier(_)));
    }
}
