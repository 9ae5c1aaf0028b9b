//! Logistic model adapter: Classifier backed by a JSON artifact.
//!
//! The artifact is exported by the external training pipeline as
//! `model.json` and holds a standardized logistic regression. This
//! adapter treats it as a black box contract: it never retrains or
//! mutates the parameters, it only evaluates them.
//!
//! # Ordering contract
//!
//! The artifact's `feature_names` must match the encoder's
//! `FEATURE_NAMES` exactly, in order. A mismatch means the artifact was
//! trained against a different encoding and is rejected at load time,
//! before any prediction can silently misuse it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FeatureVector, FEATURE_NAMES};
use crate::ports::{Classifier, ClassifierError};

/// Model parameters exported by the training pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedLogisticModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub scaler_mean: Vec<f64>,
    pub scaler_std: Vec<f64>,
}

/// Classifier adapter evaluating a pre-trained logistic regression.
///
/// Loaded once at startup; read-only afterwards, so sharing behind an
/// `Arc` across threads is safe.
#[derive(Debug)]
pub struct LogisticModel {
    model: ExportedLogisticModel,
}

impl LogisticModel {
    /// Load the model artifact from a directory (or direct file path).
    ///
    /// # Errors
    /// Returns `ClassifierError` if the artifact is missing, malformed,
    /// or does not satisfy the feature ordering contract.
    pub fn load(model_path: &Path) -> Result<Self, ClassifierError> {
        let artifact = if model_path.is_dir() {
            model_path.join("model.json")
        } else {
            model_path.to_path_buf()
        };

        if !artifact.exists() {
            return Err(ClassifierError::ArtifactUnavailable(format!(
                "No model artifact at {artifact:?} (expected model.json)"
            )));
        }

        let content = std::fs::read_to_string(&artifact)
            .map_err(|e| ClassifierError::ArtifactUnavailable(e.to_string()))?;
        let model: ExportedLogisticModel = serde_json::from_str(&content)
            .map_err(|e| ClassifierError::ArtifactFormat(e.to_string()))?;

        Self::check_contract(&model)?;

        tracing::info!(
            "Loaded logistic model from {:?} (n_features={}, intercept={:.4})",
            artifact,
            model.feature_names.len(),
            model.intercept
        );

        Ok(Self { model })
    }

    /// Build an adapter from already-parsed parameters.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the parameters violate the contract.
    pub fn from_exported(model: ExportedLogisticModel) -> Result<Self, ClassifierError> {
        Self::check_contract(&model)?;
        Ok(Self { model })
    }

    fn check_contract(model: &ExportedLogisticModel) -> Result<(), ClassifierError> {
        let n = model.feature_names.len();
        if n != FeatureVector::LEN {
            return Err(ClassifierError::ArtifactFormat(format!(
                "Model declares {n} features, encoder contract has {}",
                FeatureVector::LEN
            )));
        }
        if model.coefficients.len() != n
            || model.scaler_mean.len() != n
            || model.scaler_std.len() != n
        {
            return Err(ClassifierError::ArtifactFormat(
                "Model parameter lengths do not match feature_names length".into(),
            ));
        }

        for (declared, expected) in model.feature_names.iter().zip(FEATURE_NAMES.iter()) {
            if declared != expected {
                return Err(ClassifierError::ArtifactFormat(format!(
                    "Feature order mismatch: artifact has {declared:?} where encoder has {expected:?}"
                )));
            }
        }

        let params_finite = model.intercept.is_finite()
            && model.coefficients.iter().all(|c| c.is_finite())
            && model.scaler_mean.iter().all(|m| m.is_finite());
        if !params_finite {
            return Err(ClassifierError::ArtifactFormat(
                "Model contains non-finite parameters".into(),
            ));
        }
        if model.scaler_std.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(ClassifierError::ArtifactFormat(
                "Scaler std values must be finite and positive".into(),
            ));
        }

        Ok(())
    }

    fn sigmoid(x: f64) -> f64 {
        1.0 / (1.0 + (-x).exp())
    }
}

impl Classifier for LogisticModel {
    fn probability_of_positive_class(
        &self,
        vector: &FeatureVector,
    ) -> Result<f64, ClassifierError> {
        let features = vector.as_slice();
        if features.len() != self.model.feature_names.len() {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.model.feature_names.len(),
                actual: features.len(),
            });
        }

        let mut logit = self.model.intercept;
        for i in 0..features.len() {
            let z = (features[i] - self.model.scaler_mean[i]) / self.model.scaler_std[i];
            logit += z * self.model.coefficients[i];
        }

        let probability = Self::sigmoid(logit);
        if !probability.is_finite() {
            return Err(ClassifierError::Inference(format!(
                "Non-finite probability from logit {logit}"
            )));
        }

        tracing::debug!("Inference: logit={:.4}, probability={:.4}", logit, probability);

        Ok(probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChestPainType, ClinicalObservation, RestingEcg, Sex, StSlope};
    use std::path::Path;
    use tempfile::tempdir;

    fn test_model() -> ExportedLogisticModel {
        ExportedLogisticModel {
            feature_names: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
            coefficients: vec![0.3, 0.6, 0.5, 0.2, 0.2, 0.1, 0.1, -0.5, 0.6, 0.5, 0.4],
            intercept: -0.2,
            scaler_mean: vec![
                53.5, 0.68, 3.2, 132.0, 246.0, 0.15, 0.53, 149.0, 0.33, 1.04, 1.6,
            ],
            scaler_std: vec![
                9.4, 0.47, 0.93, 18.0, 51.0, 0.36, 0.53, 23.0, 0.47, 1.16, 0.62,
            ],
        }
    }

    fn observation(oldpeak: f64) -> ClinicalObservation {
        ClinicalObservation {
            age: 55,
            sex: Sex::Male,
            chest_pain_type: ChestPainType::Asymptomatic,
            resting_bp: 142,
            cholesterol: 260,
            fasting_blood_sugar_high: false,
            resting_ecg: RestingEcg::Normal,
            max_heart_rate: 130,
            exercise_induced_angina: true,
            oldpeak,
            st_slope: StSlope::Flat,
        }
    }

    #[test]
    fn test_load_from_directory() {
        let temp = tempdir().expect("tempdir");
        let json = serde_json::to_string(&test_model()).expect("serialize model");
        std::fs::write(temp.path().join("model.json"), json).expect("write model");

        let classifier = LogisticModel::load(temp.path()).expect("load model");
        let p = classifier
            .probability_of_positive_class(&observation(1.5).encode())
            .expect("inference");
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let temp = tempdir().expect("tempdir");
        let err = LogisticModel::load(temp.path()).expect_err("must fail");
        assert!(matches!(err, ClassifierError::ArtifactUnavailable(_)));
    }

    #[test]
    fn test_rejects_feature_order_mismatch() {
        let mut model = test_model();
        model.feature_names.swap(0, 1);
        let err = LogisticModel::from_exported(model).expect_err("must fail");
        assert!(err.to_string().contains("order mismatch"));
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let mut model = test_model();
        model.coefficients.pop();
        assert!(LogisticModel::from_exported(model).is_err());
    }

    #[test]
    fn test_rejects_bad_scaler() {
        let mut model = test_model();
        model.scaler_std[3] = 0.0;
        assert!(LogisticModel::from_exported(model).is_err());

        let mut model = test_model();
        model.scaler_mean[0] = f64::NAN;
        assert!(LogisticModel::from_exported(model).is_err());
    }

    #[test]
    fn test_probability_monotonic_in_positive_coefficient() {
        let classifier = LogisticModel::from_exported(test_model()).expect("valid model");
        // oldpeak carries a positive coefficient, so raising it must not
        // lower the probability.
        let low = classifier
            .probability_of_positive_class(&observation(0.5).encode())
            .expect("inference");
        let high = classifier
            .probability_of_positive_class(&observation(4.0).encode())
            .expect("inference");
        assert!(high > low);
    }

    #[test]
    fn test_shipped_artifact_loads() {
        let classifier = LogisticModel::load(Path::new("models")).expect("shipped model loads");
        let p = classifier
            .probability_of_positive_class(&observation(1.0).encode())
            .expect("inference");
        assert!((0.0..=1.0).contains(&p));
    }
}
