//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: standardized logistic regression loaded from a JSON
//!   model artifact exported by the training pipeline.

pub mod logistic;

pub use logistic::LogisticModel;
