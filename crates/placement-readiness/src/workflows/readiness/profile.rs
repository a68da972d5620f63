use serde::{Deserialize, Serialize};

/// Self-reported skills profile supplied by the caller. Categorical answers stay as the
/// labels the student picked; the codec decides whether they are known. Numeric answers are
/// signed so that negative or oversized input reaches [`ProfileValidator`] instead of failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub dsa_level: String,
    pub problem_count: i64,
    pub language_count: i64,
    pub cs_fundamentals: i64,
    pub project_count: i64,
    pub major_project: String,
    pub github_quality: String,
    pub domain_focus: String,
    pub communication: i64,
    pub resume_quality: i64,
    pub mock_interviews: i64,
    pub learning_consistency: i64,
    pub self_awareness: i64,
}

/// Inclusive ranges accepted for the numeric answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileBounds {
    pub max_problem_count: i64,
    pub max_language_count: i64,
    pub max_project_count: i64,
    pub max_mock_interviews: i64,
    pub min_rating: i64,
    pub max_rating: i64,
}

impl Default for ProfileBounds {
    fn default() -> Self {
        Self {
            max_problem_count: 1000,
            max_language_count: 10,
            max_project_count: 10,
            max_mock_interviews: 20,
            min_rating: 1,
            max_rating: 5,
        }
    }
}

/// Out-of-range numeric answer; surfaced to the caller for correction, never coerced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field} must be between {min} and {max} (found {found})")]
pub struct ValidationError {
    pub field: &'static str,
    pub found: i64,
    pub min: i64,
    pub max: i64,
}

/// Checks numeric answers against [`ProfileBounds`] before any encoding happens.
#[derive(Debug, Clone, Default)]
pub struct ProfileValidator {
    bounds: ProfileBounds,
}

impl ProfileValidator {
    pub fn new(bounds: ProfileBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> &ProfileBounds {
        &self.bounds
    }

    pub fn validate(&self, profile: &StudentProfile) -> Result<(), ValidationError> {
        let bounds = &self.bounds;
        let rating = (bounds.min_rating, bounds.max_rating);

        let checks: [(&'static str, i64, (i64, i64)); 9] = [
            (
                "problem_count",
                profile.problem_count,
                (0, bounds.max_problem_count),
            ),
            (
                "language_count",
                profile.language_count,
                (1, bounds.max_language_count),
            ),
            ("cs_fundamentals", profile.cs_fundamentals, rating),
            (
                "project_count",
                profile.project_count,
                (0, bounds.max_project_count),
            ),
            ("communication", profile.communication, rating),
            ("resume_quality", profile.resume_quality, rating),
            (
                "mock_interviews",
                profile.mock_interviews,
                (0, bounds.max_mock_interviews),
            ),
            ("learning_consistency", profile.learning_consistency, rating),
            ("self_awareness", profile.self_awareness, rating),
        ];

        for (field, found, (min, max)) in checks {
            if found < min || found > max {
                return Err(ValidationError {
                    field,
                    found,
                    min,
                    max,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> StudentProfile {
        StudentProfile {
            dsa_level: "Intermediate".to_string(),
            problem_count: 180,
            language_count: 3,
            cs_fundamentals: 4,
            project_count: 3,
            major_project: "Yes".to_string(),
            github_quality: "Medium".to_string(),
            domain_focus: "ML".to_string(),
            communication: 3,
            resume_quality: 4,
            mock_interviews: 2,
            learning_consistency: 4,
            self_awareness: 3,
        }
    }

    #[test]
    fn accepts_profile_within_bounds() {
        assert!(ProfileValidator::default().validate(&profile()).is_ok());
    }

    #[test]
    fn rejects_zero_languages() {
        let mut profile = profile();
        profile.language_count = 0;

        let err = ProfileValidator::default()
            .validate(&profile)
            .expect_err("at least one language");

        assert_eq!(err.field, "language_count");
        assert_eq!((err.min, err.max), (1, 10));
    }

    #[test]
    fn rejects_rating_outside_scale() {
        let mut profile = profile();
        profile.resume_quality = 6;

        let err = ProfileValidator::default()
            .validate(&profile)
            .expect_err("ratings are 1-5");

        assert_eq!(err.field, "resume_quality");
        assert_eq!(
            err.to_string(),
            "resume_quality must be between 1 and 5 (found 6)"
        );
    }

    #[test]
    fn rejects_negative_counts_and_oversized_ratings() {
        let mut negative = profile();
        negative.problem_count = -1;

        let err = ProfileValidator::default()
            .validate(&negative)
            .expect_err("counts start at zero");
        assert_eq!(err.field, "problem_count");
        assert_eq!(err.found, -1);

        let mut oversized = profile();
        oversized.communication = 300;

        let err = ProfileValidator::default()
            .validate(&oversized)
            .expect_err("ratings are 1-5");
        assert_eq!(
            err.to_string(),
            "communication must be between 1 and 5 (found 300)"
        );
    }

    #[test]
    fn custom_bounds_apply() {
        let mut profile = profile();
        profile.problem_count = 1500;
        assert!(ProfileValidator::default().validate(&profile).is_err());

        let validator = ProfileValidator::new(ProfileBounds {
            max_problem_count: 2000,
            ..ProfileBounds::default()
        });
        assert!(validator.validate(&profile).is_ok());
    }
}
