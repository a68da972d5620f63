use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use super::forest::{DecisionForest, DecisionTree};
use super::logistic::SoftmaxRegression;
use super::{InvalidModel, ReadinessModel};
use crate::workflows::readiness::codec::{CategoricalCodec, CategoricalField, LabelVocabulary};
use crate::workflows::readiness::features::FEATURE_COUNT;

pub const CLASSIFIER_ARTIFACT: &str = "placement_model.json";

/// Required inference artifact missing, unreadable, or inconsistent. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("model artifact {} not found", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse model artifact {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model artifact {name}: {source}")]
    Invalid {
        name: String,
        #[source]
        source: InvalidModel,
    },
    #[error("target labels {found:?} are not the readiness tiers Beginner, Intermediate, Advanced")]
    LabelSpace { found: Vec<String> },
    #[error("classifier predicts {model} classes but the target vocabulary has {labels}")]
    ClassCount { model: usize, labels: usize },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ClassifierArtifact {
    RandomForest {
        n_features: usize,
        n_classes: usize,
        trees: Vec<DecisionTree>,
    },
    LogisticRegression {
        coefficients: Vec<Vec<f64>>,
        intercepts: Vec<f64>,
    },
}

impl ClassifierArtifact {
    fn into_model(self) -> Result<Box<dyn ReadinessModel>, InvalidModel> {
        match self {
            ClassifierArtifact::RandomForest {
                n_features,
                n_classes,
                trees,
            } => {
                if n_features != FEATURE_COUNT {
                    return Err(InvalidModel(format!(
                        "forest was fit on {n_features} features, expected {FEATURE_COUNT}"
                    )));
                }
                Ok(Box::new(DecisionForest::new(n_classes, trees)?))
            }
            ClassifierArtifact::LogisticRegression {
                coefficients,
                intercepts,
            } => Ok(Box::new(SoftmaxRegression::new(coefficients, intercepts)?)),
        }
    }
}

/// Everything inference needs from disk: the classifier plus one vocabulary per field.
#[derive(Debug)]
pub struct ArtifactBundle {
    pub codec: CategoricalCodec,
    pub model: Box<dyn ReadinessModel>,
}

impl ArtifactBundle {
    /// Load `placement_model.json` and the five `le_*.json` encoders from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let dir = dir.as_ref();

        let vocabulary =
            |field: CategoricalField| load_vocabulary(&dir.join(field.artifact_name()));
        let codec = CategoricalCodec::from_vocabularies(
            vocabulary(CategoricalField::DsaLevel)?,
            vocabulary(CategoricalField::MajorProject)?,
            vocabulary(CategoricalField::GithubQuality)?,
            vocabulary(CategoricalField::DomainFocus)?,
            vocabulary(CategoricalField::ReadinessLevel)?,
        );

        let model = load_classifier(&dir.join(CLASSIFIER_ARTIFACT))?;
        info!(
            dir = %dir.display(),
            classes = model.class_count(),
            "loaded readiness model artifacts"
        );

        Ok(Self { codec, model })
    }
}

pub(crate) fn load_classifier(path: &Path) -> Result<Box<dyn ReadinessModel>, ModelLoadError> {
    let artifact: ClassifierArtifact = read_json(path)?;
    artifact.into_model().map_err(|source| ModelLoadError::Invalid {
        name: artifact_name(path),
        source,
    })
}

pub(crate) fn load_vocabulary(path: &Path) -> Result<LabelVocabulary, ModelLoadError> {
    let vocabulary: LabelVocabulary = read_json(path)?;

    let defect = if vocabulary.is_empty() {
        Some("vocabulary has no classes".to_string())
    } else {
        vocabulary
            .duplicate()
            .map(|label| format!("label '{label}' appears more than once"))
    };

    match defect {
        Some(reason) => Err(ModelLoadError::Invalid {
            name: artifact_name(path),
            source: InvalidModel(reason),
        }),
        None => Ok(vocabulary),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ModelLoadError::Missing {
            path: path.to_path_buf(),
        },
        _ => ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_str(&raw).map_err(|source| ModelLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn artifact_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
