use serde::{Deserialize, Serialize};

use super::classifier::ReadinessLevel;

const BEGINNER_PLAN: [&str; 4] = [
    "Learn Programming Fundamentals (Python / Java)",
    "Start DSA Basics",
    "Complete CS Fundamentals (OS, DBMS, CN)",
    "Solve 5 problems daily",
];

const INTERMEDIATE_PROJECTS: [(&str, &str); 4] = [
    ("Web", "Job Portal / Portfolio Website"),
    ("ML", "Student Placement Prediction System"),
    ("Data", "Student Performance Analysis"),
    ("Core", "CPU Scheduling Simulator"),
];

const ADVANCED_PROJECTS: [(&str, &str); 4] = [
    ("Web", "Full Stack E-commerce Platform"),
    ("ML", "AI Interview Bot / Recommendation System"),
    ("Data", "Predictive Analytics with Real Data"),
    ("Core", "OS Performance Optimization"),
];

/// Table miss while resolving guidance. Only reachable when validation was skipped upstream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no {level} recommendations for domain '{domain}'")]
pub struct UnknownDomainError {
    pub level: ReadinessLevel,
    pub domain: String,
}

/// Ordered next steps; the first item has the highest priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationSet(Vec<String>);

impl RecommendationSet {
    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RecommendationSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Map a readiness tier and domain focus to the tier's fixed guidance sequence.
pub fn resolve(
    level: ReadinessLevel,
    domain: &str,
) -> Result<RecommendationSet, UnknownDomainError> {
    let items = match level {
        ReadinessLevel::Beginner => BEGINNER_PLAN.iter().map(|item| item.to_string()).collect(),
        ReadinessLevel::Intermediate => {
            let project = lookup(&INTERMEDIATE_PROJECTS, level, domain)?;
            vec![
                format!("Focus on {domain} domain"),
                project.to_string(),
                "Improve GitHub & Resume".to_string(),
                "Start mock interviews".to_string(),
            ]
        }
        ReadinessLevel::Advanced => {
            let project = lookup(&ADVANCED_PROJECTS, level, domain)?;
            vec![
                project.to_string(),
                "Company-specific interview preparation".to_string(),
                "System design practice".to_string(),
                "Apply for internships & jobs".to_string(),
            ]
        }
    };

    Ok(RecommendationSet(items))
}

fn lookup(
    table: &[(&str, &'static str)],
    level: ReadinessLevel,
    domain: &str,
) -> Result<&'static str, UnknownDomainError> {
    table
        .iter()
        .find(|(key, _)| *key == domain)
        .map(|(_, project)| *project)
        .ok_or_else(|| UnknownDomainError {
            level,
            domain: domain.to_string(),
        })
}
