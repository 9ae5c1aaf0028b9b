//! # Cardioscreen
//!
//! Heart disease risk screening in the terminal, driven by a
//! pre-trained binary classifier.
//!
//! This crate provides:
//! - Deterministic encoding of clinical observations into the feature
//!   vector the classifier was trained on
//! - Fixed-threshold risk classification (HIGH/LOW)
//! - Terminal UI for local-only use
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (ClinicalObservation, FeatureVector, PredictionResult)
//! - `ports`: Trait definitions for external capabilities (the classifier)
//! - `adapters`: Concrete implementations (logistic model artifact)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{ClinicalObservation, FeatureVector, PredictionResult, RiskLevel};

/// Result type for Cardioscreen operations
pub type Result<T> = std::result::Result<T, CardioscreenError>;

/// Main error type for Cardioscreen
#[derive(Debug, thiserror::Error)]
pub enum CardioscreenError {
    #[error("Classifier error: {0}")]
    Classifier(#[from] ports::ClassifierError),

    #[error("Invalid observation: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
