//! Classifier port: Trait for the pre-trained probabilistic classifier.
//!
//! This trait abstracts the model artifact from the application logic so
//! tests can substitute a stub without touching global state.

use crate::domain::FeatureVector;

/// Errors reported by a classifier capability.
///
/// None of these are recoverable locally: the application propagates
/// them unchanged rather than substituting a default risk level.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("Model artifact malformed: {0}")]
    ArtifactFormat(String),

    #[error("Feature count mismatch: model expects {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Trait for binary probabilistic classifiers.
///
/// Implementations accept the 11-element feature vector in contract
/// order and return the positive ("has disease") class probability.
/// The classifier is loaded once at startup and treated as read-only,
/// so implementations must be safe to share across threads.
pub trait Classifier: Send + Sync {
    /// Probability of the positive class for the given feature vector.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the model cannot produce a
    /// probability. The caller performs no retry.
    fn probability_of_positive_class(
        &self,
        vector: &FeatureVector,
    ) -> Result<f64, ClassifierError>;
}
