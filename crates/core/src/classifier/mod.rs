//! Centroid classifier over fingerprints.
//!
//! Training averages the fingerprints of each label into a centroid. Queries
//! are scored against every centroid with an inverse-distance similarity and
//! either reduced to the best label or normalized into a confidence map.
//!
//! Centroids are kept in a `BTreeMap`, so iteration (and therefore
//! tie-breaking) follows lexicographic label order.

use std::collections::BTreeMap;

use log::{debug, info};
use thiserror::Error;

use crate::features::{FeatureExtractor, MentionMatcher, SubstringMatcher};
use crate::model::{Fingerprint, Prediction, TrainingData};

/// Error type for training and prediction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    /// A prediction was requested before any centroid was learned.
    #[error("Classifier has not been trained; no label profiles are available")]
    Untrained,

    /// The fingerprint and label lists of a training set differ in length.
    #[error("Training data has {features} fingerprints but {labels} labels")]
    LabelCountMismatch { features: usize, labels: usize },

    /// Fingerprints sharing one label do not all have the same length.
    #[error("Fingerprints for label '{label}' have inconsistent lengths ({expected} vs {found})")]
    InconsistentDimensions { label: String, expected: usize, found: usize },

    /// A training fingerprint holds a negative or non-finite slot value.
    #[error("Fingerprint for label '{label}' has an invalid value in slot {slot}")]
    InvalidFingerprint { label: String, slot: usize },
}

/// Convenience result type for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Similarity between two fingerprints: `1 / (1 + euclidean distance)`.
///
/// Returns a value in `(0, 1]`, exactly `1.0` for identical inputs. Inputs of
/// different lengths are not comparable and score `0.0`.
pub fn similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let squared: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();

    1.0 / (1.0 + squared.sqrt())
}

/// Element-wise mean of equally sized fingerprints.
///
/// Every slot must be finite and non-negative.
fn centroid_of(label: &str, members: &[&Fingerprint]) -> ClassifierResult<Option<Fingerprint>> {
    let Some(first) = members.first() else {
        return Ok(None);
    };

    let dim = first.len();
    let mut sums = vec![0.0; dim];
    for fingerprint in members {
        if fingerprint.len() != dim {
            return Err(ClassifierError::InconsistentDimensions {
                label: label.to_string(),
                expected: dim,
                found: fingerprint.len(),
            });
        }
        for (slot, (sum, value)) in sums.iter_mut().zip(fingerprint.as_slice()).enumerate() {
            if !value.is_finite() || *value < 0.0 {
                return Err(ClassifierError::InvalidFingerprint {
                    label: label.to_string(),
                    slot,
                });
            }
            *sum += value;
        }
    }

    let count = members.len() as f64;
    for sum in &mut sums {
        *sum /= count;
    }
    Ok(Some(Fingerprint::new(sums)))
}

/// Nearest-centroid language classifier.
///
/// `train` needs `&mut self` and predictions need `&self`, so one instance
/// already has single-writer / multi-reader access. Share across threads
/// behind a `RwLock` when training and predicting concurrently.
#[derive(Debug, Clone, Default)]
pub struct CentroidClassifier<M = SubstringMatcher> {
    extractor: FeatureExtractor<M>,
    profiles: BTreeMap<String, Fingerprint>,
}

impl CentroidClassifier {
    pub fn new() -> Self {
        Self { extractor: FeatureExtractor::new(), profiles: BTreeMap::new() }
    }
}

impl<M: MentionMatcher> CentroidClassifier<M> {
    /// Build a classifier around a specific extractor.
    pub fn with_extractor(extractor: FeatureExtractor<M>) -> Self {
        Self { extractor, profiles: BTreeMap::new() }
    }

    pub fn extractor(&self) -> &FeatureExtractor<M> {
        &self.extractor
    }

    pub fn is_trained(&self) -> bool {
        !self.profiles.is_empty()
    }

    /// Known labels in lexicographic order.
    pub fn labels(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    pub fn centroid(&self, label: &str) -> Option<&Fingerprint> {
        self.profiles.get(label)
    }

    pub fn centroids(&self) -> &BTreeMap<String, Fingerprint> {
        &self.profiles
    }

    /// Learn one centroid per label present in `data`.
    ///
    /// A label present in this batch has its centroid replaced by the batch
    /// mean; labels absent from the batch keep whatever they had. On error no
    /// centroid is modified.
    pub fn train(&mut self, data: &TrainingData) -> ClassifierResult<()> {
        if data.features.len() != data.labels.len() {
            return Err(ClassifierError::LabelCountMismatch {
                features: data.features.len(),
                labels: data.labels.len(),
            });
        }

        let mut grouped: BTreeMap<&str, Vec<&Fingerprint>> = BTreeMap::new();
        for (fingerprint, label) in data.features.iter().zip(&data.labels) {
            grouped.entry(label.as_str()).or_default().push(fingerprint);
        }

        let mut learned = Vec::with_capacity(grouped.len());
        for (label, members) in &grouped {
            if let Some(centroid) = centroid_of(label, members)? {
                debug!("Centroid for '{}' averaged from {} samples", label, members.len());
                learned.push((label.to_string(), centroid));
            }
        }

        for (label, centroid) in learned {
            self.profiles.insert(label, centroid);
        }

        info!(
            "Training complete: {} samples in batch, {} label profiles known",
            data.len(),
            self.profiles.len()
        );
        Ok(())
    }

    /// Fingerprint raw `(label, assembly)` pairs with the owned extractor, then train.
    pub fn train_samples<L, A>(&mut self, samples: &[(L, A)]) -> ClassifierResult<()>
    where
        L: AsRef<str>,
        A: AsRef<str>,
    {
        let mut data = TrainingData::new();
        for (label, assembly) in samples {
            data.push(self.extractor.extract(assembly.as_ref()), label.as_ref());
        }
        self.train(&data)
    }

    /// Similarity of `fingerprint` against every centroid, in label order.
    fn score(&self, fingerprint: &Fingerprint) -> ClassifierResult<Vec<(&str, f64)>> {
        if self.profiles.is_empty() {
            return Err(ClassifierError::Untrained);
        }
        Ok(self
            .profiles
            .iter()
            .map(|(label, centroid)| {
                (label.as_str(), similarity(fingerprint.as_slice(), centroid.as_slice()))
            })
            .collect())
    }

    /// Label whose centroid is most similar to the sample.
    ///
    /// Ties go to the lexicographically smallest label.
    pub fn predict(&self, assembly: &str) -> ClassifierResult<String> {
        let fingerprint = self.extractor.extract(assembly);
        self.predict_fingerprint(&fingerprint)
    }

    /// Same as [`Self::predict`] for an already extracted fingerprint.
    pub fn predict_fingerprint(&self, fingerprint: &Fingerprint) -> ClassifierResult<String> {
        let scores = self.score(fingerprint)?;
        Ok(best_label(&scores))
    }

    /// Normalized confidence for every known label.
    ///
    /// Values sum to 1 whenever any similarity is non-zero. When every
    /// centroid has a different length from the query all similarities are
    /// zero and the raw zeros are returned.
    pub fn predict_with_confidence(
        &self,
        assembly: &str,
    ) -> ClassifierResult<BTreeMap<String, f64>> {
        let fingerprint = self.extractor.extract(assembly);
        self.confidences_for(&fingerprint)
    }

    /// Same as [`Self::predict_with_confidence`] for an already extracted fingerprint.
    pub fn confidences_for(
        &self,
        fingerprint: &Fingerprint,
    ) -> ClassifierResult<BTreeMap<String, f64>> {
        let scores = self.score(fingerprint)?;
        Ok(normalize(&scores))
    }

    /// Best label and confidence map from a single extraction.
    pub fn classify(&self, assembly: &str) -> ClassifierResult<Prediction> {
        let fingerprint = self.extractor.extract(assembly);
        let scores = self.score(&fingerprint)?;
        Ok(Prediction { label: best_label(&scores), confidences: normalize(&scores) })
    }
}

fn best_label(scores: &[(&str, f64)]) -> String {
    let mut best_label = "";
    let mut best_similarity = -1.0;
    for (label, similarity) in scores {
        if *similarity > best_similarity {
            best_similarity = *similarity;
            best_label = *label;
        }
    }
    best_label.to_string()
}

fn normalize(scores: &[(&str, f64)]) -> BTreeMap<String, f64> {
    let total: f64 = scores.iter().map(|(_, s)| s).sum();
    scores
        .iter()
        .map(|(label, s)| {
            let value = if total > 0.0 { s / total } else { *s };
            (label.to_string(), value)
        })
        .collect()
}
