//! asmid-core
//!
//! Core library for inferring the source language of a compiled function from
//! its disassembly text.
//!
//! This crate defines the fingerprint data model, the feature extractor that
//! turns assembly listings into fingerprints, the centroid classifier, and the
//! training-manifest configuration used by frontends.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, services, etc.).

pub mod classifier;
pub mod demo;
pub mod features;
pub mod manifest;
pub mod model;

pub use classifier::{similarity, CentroidClassifier, ClassifierError, ClassifierResult};
pub use features::{FeatureExtractor, FINGERPRINT_LEN, FINGERPRINT_SLOTS};
pub use model::{Fingerprint, Prediction, TrainingData};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
