use serde::Serialize;

use super::codec::{CategoricalCodec, CategoricalField, UnknownCategoryError};
use super::profile::{ProfileValidator, StudentProfile, ValidationError};

pub const FEATURE_COUNT: usize = 13;

/// Column order the classifier was fit with.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "dsa_code",
    "problem_count",
    "language_count",
    "cs_fundamentals",
    "project_count",
    "major_code",
    "github_code",
    "domain_code",
    "communication",
    "resume_quality",
    "mock_interviews",
    "learning_consistency",
    "self_awareness",
];

/// Raw, unscaled model inputs for a single profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
}

/// Validates a profile and lays it out in classifier column order.
pub struct FeatureVectorBuilder<'a> {
    codec: &'a CategoricalCodec,
    validator: &'a ProfileValidator,
}

impl<'a> FeatureVectorBuilder<'a> {
    pub fn new(codec: &'a CategoricalCodec, validator: &'a ProfileValidator) -> Self {
        Self { codec, validator }
    }

    pub fn build(&self, profile: &StudentProfile) -> Result<FeatureVector, FeatureError> {
        // Numeric casts below rely on the bounds checked here.
        self.validator.validate(profile)?;

        let dsa = self.code(CategoricalField::DsaLevel, &profile.dsa_level)?;
        let major = self.code(CategoricalField::MajorProject, &profile.major_project)?;
        let github = self.code(CategoricalField::GithubQuality, &profile.github_quality)?;
        let domain = self.code(CategoricalField::DomainFocus, &profile.domain_focus)?;

        Ok(FeatureVector([
            dsa,
            profile.problem_count as f64,
            profile.language_count as f64,
            profile.cs_fundamentals as f64,
            profile.project_count as f64,
            major,
            github,
            domain,
            profile.communication as f64,
            profile.resume_quality as f64,
            profile.mock_interviews as f64,
            profile.learning_consistency as f64,
            profile.self_awareness as f64,
        ]))
    }

    fn code(&self, field: CategoricalField, value: &str) -> Result<f64, UnknownCategoryError> {
        self.codec.encode(field, value).map(|code| code as f64)
    }
}
