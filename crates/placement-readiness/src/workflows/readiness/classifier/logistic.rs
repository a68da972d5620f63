use super::{argmax, InvalidModel, ReadinessModel};
use crate::workflows::readiness::features::{FeatureVector, FEATURE_COUNT};

/// Multinomial logistic regression: softmax over one linear score per class.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftmaxRegression {
    coefficients: Vec<Vec<f64>>,
    intercepts: Vec<f64>,
}

impl SoftmaxRegression {
    pub fn new(coefficients: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Result<Self, InvalidModel> {
        if coefficients.len() < 2 {
            return Err(InvalidModel(format!(
                "logistic model needs at least two classes, found {}",
                coefficients.len()
            )));
        }
        if intercepts.len() != coefficients.len() {
            return Err(InvalidModel(format!(
                "{} intercepts for {} coefficient rows",
                intercepts.len(),
                coefficients.len()
            )));
        }
        for (class, row) in coefficients.iter().enumerate() {
            if row.len() != FEATURE_COUNT {
                return Err(InvalidModel(format!(
                    "class {class} has {} coefficients, expected {FEATURE_COUNT}",
                    row.len()
                )));
            }
        }
        let finite = coefficients.iter().flatten().chain(&intercepts).all(|w| w.is_finite());
        if !finite {
            return Err(InvalidModel(
                "logistic model has non-finite parameters".to_string(),
            ));
        }

        Ok(Self {
            coefficients,
            intercepts,
        })
    }

    fn scores(&self, features: &FeatureVector) -> Vec<f64> {
        self.coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(row, intercept)| {
                row.iter()
                    .zip(features.values())
                    .map(|(weight, x)| weight * x)
                    .sum::<f64>()
                    + intercept
            })
            .collect()
    }
}

impl ReadinessModel for SoftmaxRegression {
    fn predict(&self, features: &FeatureVector) -> usize {
        argmax(&self.scores(features))
    }

    fn predict_distribution(&self, features: &FeatureVector) -> Vec<f64> {
        let scores = self.scores(features);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|score| (score - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|value| value / total).collect()
    }

    fn class_count(&self) -> usize {
        self.coefficients.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SoftmaxRegression {
        let mut advanced = vec![0.0; FEATURE_COUNT];
        advanced[1] = 0.02;
        let beginner = vec![0.0; FEATURE_COUNT];
        let mut intermediate = vec![0.0; FEATURE_COUNT];
        intermediate[1] = 0.01;

        SoftmaxRegression::new(vec![advanced, beginner, intermediate], vec![-4.0, 0.0, -1.0])
            .expect("valid model")
    }

    fn with_problems(count: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[1] = count;
        FeatureVector::from_values(values)
    }

    #[test]
    fn distribution_is_normalized() {
        let distribution = model().predict_distribution(&with_problems(120.0));
        let total: f64 = distribution.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(distribution.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn prediction_tracks_problem_count() {
        let model = model();
        assert_eq!(model.predict(&with_problems(0.0)), 1);
        assert_eq!(model.predict(&with_problems(400.0)), 0);
    }

    #[test]
    fn large_scores_do_not_overflow() {
        let distribution = model().predict_distribution(&with_problems(1.0e6));
        assert!(distribution.iter().all(|p| p.is_finite()));
        assert!((distribution[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_short_coefficient_rows() {
        let err = SoftmaxRegression::new(vec![vec![0.0; 12], vec![0.0; 13]], vec![0.0, 0.0])
            .expect_err("row too short");
        assert!(err.0.contains("expected 13"));
    }
}
