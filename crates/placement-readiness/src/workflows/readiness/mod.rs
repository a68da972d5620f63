//! Readiness inference pipeline: profile validation, categorical encoding, feature layout,
//! classification and recommendation resolution.

pub mod classifier;
pub mod codec;
pub mod cohort;
mod features;
pub mod profile;
pub mod recommendations;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{
    ArtifactBundle, DecisionForest, DecisionTree, InferenceError, ModelLoadError,
    ReadinessClassifier, ReadinessLevel, ReadinessModel, ReadinessResult, SoftmaxRegression,
    TreeNode,
};
pub use codec::{CategoricalCodec, CategoricalField, LabelVocabulary, UnknownCategoryError};
pub use cohort::{
    assess_cohort, assess_cohort_file, assess_cohort_reader, CohortEntry, CohortImportError,
    CohortReport, RowParseError,
};
pub use features::{
    FeatureError, FeatureVector, FeatureVectorBuilder, FEATURE_COUNT, FEATURE_NAMES,
};
pub use profile::{ProfileBounds, ProfileValidator, StudentProfile, ValidationError};
pub use recommendations::{resolve, RecommendationSet, UnknownDomainError};
pub use router::readiness_router;
pub use service::{AssessmentError, AssessmentReport, ReadinessPipeline};
