use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorical inputs (plus the target label) that the classifier saw as integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    DsaLevel,
    MajorProject,
    GithubQuality,
    DomainFocus,
    ReadinessLevel,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::DsaLevel,
        CategoricalField::MajorProject,
        CategoricalField::GithubQuality,
        CategoricalField::DomainFocus,
        CategoricalField::ReadinessLevel,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CategoricalField::DsaLevel => "dsa_level",
            CategoricalField::MajorProject => "major_project",
            CategoricalField::GithubQuality => "github_quality",
            CategoricalField::DomainFocus => "domain_focus",
            CategoricalField::ReadinessLevel => "level",
        }
    }

    /// File name of the label-encoder artifact for this field.
    pub const fn artifact_name(self) -> &'static str {
        match self {
            CategoricalField::DsaLevel => "le_dsa.json",
            CategoricalField::MajorProject => "le_major.json",
            CategoricalField::GithubQuality => "le_github.json",
            CategoricalField::DomainFocus => "le_domain.json",
            CategoricalField::ReadinessLevel => "le_target.json",
        }
    }

    /// Vocabulary used when no artifact overrides it. Classes are sorted, matching how the
    /// encoders were fit.
    pub fn default_classes(self) -> &'static [&'static str] {
        match self {
            CategoricalField::DsaLevel => &["Advanced", "Beginner", "Intermediate"],
            CategoricalField::MajorProject => &["No", "Yes"],
            CategoricalField::GithubQuality => &["High", "Low", "Medium"],
            CategoricalField::DomainFocus => &["Core", "Data", "ML", "Web"],
            CategoricalField::ReadinessLevel => &["Advanced", "Beginner", "Intermediate"],
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a label or code falls outside a field's trained vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnknownCategoryError {
    #[error("unknown {field} value '{value}' (expected one of: {expected})")]
    Label {
        field: CategoricalField,
        value: String,
        expected: String,
    },
    #[error("unknown {field} code {code} (vocabulary has {size} entries)")]
    Code {
        field: CategoricalField,
        code: usize,
        size: usize,
    },
}

impl UnknownCategoryError {
    pub fn field(&self) -> CategoricalField {
        match self {
            UnknownCategoryError::Label { field, .. }
            | UnknownCategoryError::Code { field, .. } => *field,
        }
    }
}

/// Ordered class list of one label encoder; a label's code is its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelVocabulary {
    classes: Vec<String>,
}

impl LabelVocabulary {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|class| class == label)
    }

    pub fn get(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }

    /// First label that appears more than once, if any.
    pub fn duplicate(&self) -> Option<&str> {
        self.classes
            .iter()
            .enumerate()
            .find(|(idx, class)| self.classes[..*idx].contains(class))
            .map(|(_, class)| class.as_str())
    }
}

/// Frozen label ↔ code mapping for every categorical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoricalCodec {
    dsa_level: LabelVocabulary,
    major_project: LabelVocabulary,
    github_quality: LabelVocabulary,
    domain_focus: LabelVocabulary,
    readiness_level: LabelVocabulary,
}

impl Default for CategoricalCodec {
    fn default() -> Self {
        let vocabulary =
            |field: CategoricalField| LabelVocabulary::new(field.default_classes().iter().copied());
        Self {
            dsa_level: vocabulary(CategoricalField::DsaLevel),
            major_project: vocabulary(CategoricalField::MajorProject),
            github_quality: vocabulary(CategoricalField::GithubQuality),
            domain_focus: vocabulary(CategoricalField::DomainFocus),
            readiness_level: vocabulary(CategoricalField::ReadinessLevel),
        }
    }
}

impl CategoricalCodec {
    pub fn from_vocabularies(
        dsa_level: LabelVocabulary,
        major_project: LabelVocabulary,
        github_quality: LabelVocabulary,
        domain_focus: LabelVocabulary,
        readiness_level: LabelVocabulary,
    ) -> Self {
        Self {
            dsa_level,
            major_project,
            github_quality,
            domain_focus,
            readiness_level,
        }
    }

    pub fn vocabulary(&self, field: CategoricalField) -> &LabelVocabulary {
        match field {
            CategoricalField::DsaLevel => &self.dsa_level,
            CategoricalField::MajorProject => &self.major_project,
            CategoricalField::GithubQuality => &self.github_quality,
            CategoricalField::DomainFocus => &self.domain_focus,
            CategoricalField::ReadinessLevel => &self.readiness_level,
        }
    }

    /// Exact, case-sensitive lookup. Never falls back to a default code.
    pub fn encode(
        &self,
        field: CategoricalField,
        value: &str,
    ) -> Result<usize, UnknownCategoryError> {
        let vocabulary = self.vocabulary(field);
        vocabulary
            .position(value)
            .ok_or_else(|| UnknownCategoryError::Label {
                field,
                value: value.to_string(),
                expected: vocabulary.classes().join(", "),
            })
    }

    pub fn decode(
        &self,
        field: CategoricalField,
        code: usize,
    ) -> Result<&str, UnknownCategoryError> {
        let vocabulary = self.vocabulary(field);
        vocabulary.get(code).ok_or(UnknownCategoryError::Code {
            field,
            code,
            size: vocabulary.len(),
        })
    }
}
