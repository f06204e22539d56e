//! Core data model shared by the extractor, the classifier, and frontends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fixed-length numeric summary of one assembly sample.
///
/// Slot order is defined by [`crate::features::FINGERPRINT_SLOTS`]. Two
/// fingerprints are only comparable when produced by the same slot layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(Vec<f64>);

impl Fingerprint {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// True when every slot is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }
}

/// Parallel fingerprint / label lists supplied wholesale to training.
///
/// `features[i]` carries `labels[i]`. Callers building this by hand are
/// responsible for keeping both lists the same length; the classifier rejects
/// mismatched lists instead of guessing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    pub features: Vec<Fingerprint>,
    pub labels: Vec<String>,
}

impl TrainingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one labeled fingerprint, keeping both lists aligned.
    pub fn push(&mut self, fingerprint: Fingerprint, label: impl Into<String>) -> &mut Self {
        self.features.push(fingerprint);
        self.labels.push(label.into());
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.features.is_empty()
    }
}

/// Result of classifying one sample: best label plus the full confidence map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Every known label mapped to its normalized confidence.
    pub confidences: BTreeMap<String, f64>,
}

impl Prediction {
    /// Confidence assigned to the predicted label.
    pub fn confidence(&self) -> f64 {
        self.confidences.get(&self.label).copied().unwrap_or(0.0)
    }
}
