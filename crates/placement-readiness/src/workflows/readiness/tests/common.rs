use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::readiness::classifier::{ReadinessModel, TreeNode};
use crate::workflows::readiness::{
    CategoricalCodec, DecisionForest, DecisionTree, FeatureVector, ProfileBounds,
    ReadinessPipeline, StudentProfile,
};

/// Model stub returning a canned label and distribution while counting calls.
#[derive(Debug, Clone)]
pub(super) struct FixedModel {
    pub(super) label: usize,
    pub(super) distribution: Vec<f64>,
    pub(super) calls: Arc<AtomicUsize>,
}

impl FixedModel {
    pub(super) fn new(label: usize, distribution: &[f64]) -> Self {
        Self {
            label,
            distribution: distribution.to_vec(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReadinessModel for FixedModel {
    fn predict(&self, _features: &FeatureVector) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.label
    }

    fn predict_distribution(&self, _features: &FeatureVector) -> Vec<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.distribution.clone()
    }

    fn class_count(&self) -> usize {
        3
    }
}

/// Target codes under the default vocabulary.
pub(super) const ADVANCED: usize = 0;
pub(super) const BEGINNER: usize = 1;
pub(super) const INTERMEDIATE: usize = 2;

pub(super) fn profile() -> StudentProfile {
    StudentProfile {
        dsa_level: "Beginner".to_string(),
        problem_count: 10,
        language_count: 2,
        cs_fundamentals: 2,
        project_count: 1,
        major_project: "No".to_string(),
        github_quality: "Low".to_string(),
        domain_focus: "Web".to_string(),
        communication: 3,
        resume_quality: 2,
        mock_interviews: 0,
        learning_consistency: 3,
        self_awareness: 4,
    }
}

pub(super) fn strong_profile() -> StudentProfile {
    StudentProfile {
        dsa_level: "Advanced".to_string(),
        problem_count: 420,
        language_count: 4,
        cs_fundamentals: 5,
        project_count: 6,
        major_project: "Yes".to_string(),
        github_quality: "High".to_string(),
        domain_focus: "ML".to_string(),
        communication: 4,
        resume_quality: 5,
        mock_interviews: 8,
        learning_consistency: 5,
        self_awareness: 4,
    }
}

pub(super) fn pipeline_with(model: FixedModel) -> ReadinessPipeline {
    ReadinessPipeline::new(
        CategoricalCodec::default(),
        Box::new(model),
        ProfileBounds::default(),
    )
    .expect("stub model matches label space")
}

/// Intermediate at 72%, matching the worked example for a web-focused student.
pub(super) fn intermediate_model() -> FixedModel {
    FixedModel::new(INTERMEDIATE, &[0.08, 0.20, 0.72])
}

fn stump(feature: usize, threshold: f64, low: [f64; 3], high: [f64; 3]) -> DecisionTree {
    DecisionTree::new(vec![
        TreeNode::Split {
            feature,
            threshold,
            left: 1,
            right: 2,
        },
        TreeNode::Leaf {
            value: low.to_vec(),
        },
        TreeNode::Leaf {
            value: high.to_vec(),
        },
    ])
}

/// Small forest keyed on problem count and project count.
pub(super) fn forest() -> DecisionForest {
    DecisionForest::new(
        3,
        vec![
            stump(1, 100.5, [0.0, 9.0, 1.0], [7.0, 0.0, 3.0]),
            stump(4, 2.5, [0.0, 6.0, 4.0], [8.0, 0.0, 2.0]),
        ],
    )
    .expect("valid forest")
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}
