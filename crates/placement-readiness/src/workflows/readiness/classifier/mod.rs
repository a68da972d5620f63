//! Classifier capability interface and the adapter that turns raw model output into a
//! readiness tier with a confidence percentage.

mod artifact;
mod forest;
mod logistic;

pub use artifact::{ArtifactBundle, ModelLoadError, CLASSIFIER_ARTIFACT};
#[cfg(test)]
pub(crate) use artifact::{load_classifier, load_vocabulary};
pub use forest::{DecisionForest, DecisionTree, TreeNode};
pub use logistic::SoftmaxRegression;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::codec::{CategoricalCodec, CategoricalField, UnknownCategoryError};
use super::features::FeatureVector;

/// Anything that can score a feature vector: a label index plus per-class probabilities.
pub trait ReadinessModel: Send + Sync + fmt::Debug {
    fn predict(&self, features: &FeatureVector) -> usize;
    fn predict_distribution(&self, features: &FeatureVector) -> Vec<f64>;
    fn class_count(&self) -> usize;
}

/// Structural defect found while assembling a model from its parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidModel(pub String);

/// Readiness tiers the deployed classifier predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ReadinessLevel {
    pub const ALL: [ReadinessLevel; 3] = [
        ReadinessLevel::Beginner,
        ReadinessLevel::Intermediate,
        ReadinessLevel::Advanced,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ReadinessLevel::Beginner => "Beginner",
            ReadinessLevel::Intermediate => "Intermediate",
            ReadinessLevel::Advanced => "Advanced",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == value)
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Predicted tier and the classifier's own confidence in it, as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResult {
    pub level: ReadinessLevel,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error(transparent)]
    UnknownLabel(#[from] UnknownCategoryError),
    #[error("classifier returned {found} probabilities for {expected} classes")]
    DistributionShape { expected: usize, found: usize },
}

/// Wraps a loaded model together with the target vocabulary used to name its classes.
#[derive(Debug)]
pub struct ReadinessClassifier {
    model: Box<dyn ReadinessModel>,
    codec: Arc<CategoricalCodec>,
}

impl ReadinessClassifier {
    /// Pairs a model with the codec, refusing label spaces that are not the three tiers.
    pub fn new(
        model: Box<dyn ReadinessModel>,
        codec: Arc<CategoricalCodec>,
    ) -> Result<Self, ModelLoadError> {
        let labels = codec.vocabulary(CategoricalField::ReadinessLevel);

        let known: Vec<ReadinessLevel> = labels
            .classes()
            .iter()
            .filter_map(|label| ReadinessLevel::from_label(label))
            .collect();
        let complete = labels.len() == ReadinessLevel::ALL.len()
            && known.len() == labels.len()
            && labels.duplicate().is_none();
        if !complete {
            return Err(ModelLoadError::LabelSpace {
                found: labels.classes().to_vec(),
            });
        }

        if model.class_count() != labels.len() {
            return Err(ModelLoadError::ClassCount {
                model: model.class_count(),
                labels: labels.len(),
            });
        }

        Ok(Self { model, codec })
    }

    pub fn infer(&self, features: &FeatureVector) -> Result<ReadinessResult, InferenceError> {
        let index = self.model.predict(features);
        let distribution = self.model.predict_distribution(features);

        let expected = self.model.class_count();
        if distribution.len() != expected {
            return Err(InferenceError::DistributionShape {
                expected,
                found: distribution.len(),
            });
        }

        let label = self.codec.decode(CategoricalField::ReadinessLevel, index)?;
        // The label space was checked in `new`, so every decoded label is a tier.
        let level = ReadinessLevel::from_label(label).ok_or_else(|| UnknownCategoryError::Code {
            field: CategoricalField::ReadinessLevel,
            code: index,
            size: expected,
        })?;

        Ok(ReadinessResult {
            level,
            confidence: confidence_percent(&distribution),
        })
    }
}

/// `floor(max_probability * 100)`, bounded to 0..=100. Non-finite entries are ignored.
pub fn confidence_percent(distribution: &[f64]) -> u8 {
    let max = distribution
        .iter()
        .copied()
        .filter(|probability| probability.is_finite())
        .fold(0.0_f64, f64::max);
    (max * 100.0).floor().clamp(0.0, 100.0) as u8
}

/// Index of the largest value; the first one wins ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    best
}
