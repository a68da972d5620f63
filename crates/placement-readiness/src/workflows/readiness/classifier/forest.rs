use serde::{Deserialize, Serialize};

use super::{argmax, InvalidModel, ReadinessModel};
use crate::workflows::readiness::features::{FeatureVector, FEATURE_COUNT};

/// One node of a fitted decision tree. Splits send `x[feature] <= threshold` left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

/// Flattened tree; node 0 is the root and children always sit after their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    fn check(&self, tree: usize, n_classes: usize) -> Result<(), InvalidModel> {
        if self.nodes.is_empty() {
            return Err(InvalidModel(format!("tree {tree} has no nodes")));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(InvalidModel(format!(
                            "tree {tree} node {index} splits on feature {feature} of {FEATURE_COUNT}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(InvalidModel(format!(
                            "tree {tree} node {index} has a non-finite threshold"
                        )));
                    }
                    for child in [*left, *right] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(InvalidModel(format!(
                                "tree {tree} node {index} points at invalid child {child}"
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(InvalidModel(format!(
                            "tree {tree} leaf {index} has {} class weights, expected {n_classes}",
                            value.len()
                        )));
                    }
                    let valid = value.iter().all(|w| w.is_finite() && *w >= 0.0);
                    if !valid || value.iter().sum::<f64>() <= 0.0 {
                        return Err(InvalidModel(format!(
                            "tree {tree} leaf {index} needs non-negative weights with a positive sum"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn leaf(&self, features: &FeatureVector) -> &[f64] {
        let values = features.values();
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if values[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

/// Random-forest style ensemble: per-tree leaf weights are normalized and averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionForest {
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl DecisionForest {
    pub fn new(n_classes: usize, trees: Vec<DecisionTree>) -> Result<Self, InvalidModel> {
        if n_classes < 2 {
            return Err(InvalidModel(format!(
                "forest needs at least two classes, found {n_classes}"
            )));
        }
        if trees.is_empty() {
            return Err(InvalidModel("forest has no trees".to_string()));
        }
        for (index, tree) in trees.iter().enumerate() {
            tree.check(index, n_classes)?;
        }

        Ok(Self { n_classes, trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl ReadinessModel for DecisionForest {
    fn predict(&self, features: &FeatureVector) -> usize {
        argmax(&self.predict_distribution(features))
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Vec<f64> {
        let mut totals = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let leaf = tree.leaf(features);
            let weight: f64 = leaf.iter().sum();
            for (total, value) in totals.iter_mut().zip(leaf) {
                *total += value / weight;
            }
        }

        let count = self.trees.len() as f64;
        totals.iter_mut().for_each(|total| *total /= count);
        totals
    }

    fn class_count(&self) -> usize {
        self.n_classes
    }
}
