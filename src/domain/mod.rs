//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no external dependencies.
//! The feature encoding lives here because it is a contract with the
//! model artifact, not an implementation detail of any adapter.

mod observation;
mod prediction;

pub use observation::{
    ChestPainType, ClinicalObservation, FeatureVector, RestingEcg, Sex, StSlope, FEATURE_NAMES,
};
pub use prediction::{DecisionThreshold, PredictionResult, RiskLevel};
