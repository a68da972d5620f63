use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::classifier::{
    ArtifactBundle, InferenceError, ModelLoadError, ReadinessClassifier, ReadinessModel,
    ReadinessResult,
};
use super::codec::{CategoricalCodec, UnknownCategoryError};
use super::features::{FeatureError, FeatureVector, FeatureVectorBuilder};
use super::profile::{ProfileBounds, ProfileValidator, StudentProfile, ValidationError};
use super::recommendations::{self, RecommendationSet, UnknownDomainError};

/// Classifier verdict plus the guidance derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentReport {
    pub result: ReadinessResult,
    pub recommendations: RecommendationSet,
}

/// Error raised while assessing a single profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
    #[error(transparent)]
    UnknownDomain(#[from] UnknownDomainError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl AssessmentError {
    /// Profile field the caller should correct, when the error is theirs to fix.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AssessmentError::Validation(err) => Some(err.field),
            AssessmentError::UnknownCategory(err) => Some(err.field().label()),
            AssessmentError::UnknownDomain(_) | AssessmentError::Inference(_) => None,
        }
    }

    /// Whether the caller can fix the input, as opposed to an internal defect.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AssessmentError::Validation(_) | AssessmentError::UnknownCategory(_)
        )
    }
}

impl From<FeatureError> for AssessmentError {
    fn from(value: FeatureError) -> Self {
        match value {
            FeatureError::Validation(err) => Self::Validation(err),
            FeatureError::UnknownCategory(err) => Self::UnknownCategory(err),
        }
    }
}

/// Validate → encode → classify → recommend. Immutable once built, so one instance can be
/// shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct ReadinessPipeline {
    validator: ProfileValidator,
    codec: Arc<CategoricalCodec>,
    classifier: ReadinessClassifier,
}

impl ReadinessPipeline {
    pub fn new(
        codec: CategoricalCodec,
        model: Box<dyn ReadinessModel>,
        bounds: ProfileBounds,
    ) -> Result<Self, ModelLoadError> {
        let codec = Arc::new(codec);
        let classifier = ReadinessClassifier::new(model, codec.clone())?;

        Ok(Self {
            validator: ProfileValidator::new(bounds),
            codec,
            classifier,
        })
    }

    /// Load artifacts from `dir`; any failure here should abort startup.
    pub fn from_artifacts(
        dir: impl AsRef<Path>,
        bounds: ProfileBounds,
    ) -> Result<Self, ModelLoadError> {
        let ArtifactBundle { codec, model } = ArtifactBundle::load(dir)?;
        Self::new(codec, model, bounds)
    }

    pub fn codec(&self) -> &CategoricalCodec {
        &self.codec
    }

    pub fn bounds(&self) -> &ProfileBounds {
        self.validator.bounds()
    }

    pub fn features(&self, profile: &StudentProfile) -> Result<FeatureVector, AssessmentError> {
        let features = FeatureVectorBuilder::new(&self.codec, &self.validator).build(profile)?;
        debug!(features = ?features.values(), "built feature vector");
        Ok(features)
    }

    /// Classify a profile without resolving recommendations.
    pub fn predict_level(
        &self,
        profile: &StudentProfile,
    ) -> Result<ReadinessResult, AssessmentError> {
        let features = self.features(profile)?;
        Ok(self.classifier.infer(&features)?)
    }

    /// Full assessment for one profile.
    pub fn assess(&self, profile: &StudentProfile) -> Result<AssessmentReport, AssessmentError> {
        let result = match self.predict_level(profile) {
            Ok(result) => result,
            Err(err) => {
                warn!(field = ?err.field(), error = %err, "profile rejected");
                return Err(err);
            }
        };

        let recommendations = recommendations::resolve(result.level, &profile.domain_focus)?;
        info!(
            level = %result.level,
            confidence = result.confidence,
            domain = %profile.domain_focus,
            "readiness assessed"
        );

        Ok(AssessmentReport {
            result,
            recommendations,
        })
    }
}
