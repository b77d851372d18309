use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::{FeatureVector, MultiLabelModel};

const ARTIFACT: &str = "linear classifier";

/// On-disk shape of the one-vs-rest linear classifier: one weight row and one
/// intercept per label.
///
/// ```json
/// { "coef": [[0.9, -0.2], [-0.1, 1.3]], "intercept": [-0.3, -0.2] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearSpec {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// One linear decision boundary per label, stored row-major.
#[derive(Debug, Clone)]
pub struct LinearOvrClassifier {
    weights: Vec<f64>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearOvrClassifier {
    pub fn from_spec(spec: LinearSpec) -> Result<Self, ModelError> {
        let LinearSpec { coef, intercept } = spec;

        let n_labels = coef.len();
        if n_labels == 0 {
            return Err(ModelError::invalid(ARTIFACT, "coefficient matrix has no rows"));
        }
        let n_features = coef[0].len();
        if n_features == 0 {
            return Err(ModelError::invalid(ARTIFACT, "coefficient rows are empty"));
        }
        if let Some((row, weights)) = coef
            .iter()
            .enumerate()
            .find(|(_, weights)| weights.len() != n_features)
        {
            return Err(ModelError::invalid(
                ARTIFACT,
                format!(
                    "row {row} has {} weights, expected {n_features}",
                    weights.len()
                ),
            ));
        }
        if intercept.len() != n_labels {
            return Err(ModelError::DimensionMismatch {
                what: "classifier intercepts",
                expected: n_labels,
                actual: intercept.len(),
            });
        }

        let weights: Vec<f64> = coef.into_iter().flatten().collect();
        if weights.iter().chain(&intercept).any(|w| !w.is_finite()) {
            return Err(ModelError::invalid(ARTIFACT, "weights must be finite"));
        }

        Ok(Self {
            weights,
            intercept,
            n_features,
        })
    }

    fn row(&self, label: usize) -> &[f64] {
        let start = label * self.n_features;
        &self.weights[start..start + self.n_features]
    }
}

impl MultiLabelModel for LinearOvrClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_labels(&self) -> usize {
        self.intercept.len()
    }

    fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>, ModelError> {
        if features.dim() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                what: "classifier input",
                expected: self.n_features,
                actual: features.dim(),
            });
        }

        Ok((0..self.n_labels())
            .map(|label| {
                let row = self.row(label);
                features
                    .entries()
                    .iter()
                    .fold(self.intercept[label], |acc, &(col, value)| {
                        acc + row[col] * value
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LinearOvrClassifier {
        LinearOvrClassifier::from_spec(LinearSpec {
            coef: vec![vec![1.0, -1.0, 0.0], vec![0.0, 2.0, 0.5]],
            intercept: vec![-0.1, 0.0],
        })
        .unwrap()
    }

    #[test]
    fn decision_function_is_affine() {
        let model = classifier();
        let x = FeatureVector::new(3, vec![(0, 0.5), (1, 0.25)]).unwrap();
        let scores = model.decision_function(&x).unwrap();
        assert!((scores[0] - (-0.1 + 0.5 - 0.25)).abs() < 1e-12);
        assert!((scores[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_scores_are_intercepts() {
        let model = classifier();
        let scores = model.decision_function(&FeatureVector::zeros(3)).unwrap();
        assert_eq!(scores, vec![-0.1, 0.0]);
    }

    #[test]
    fn predict_thresholds_at_zero() {
        let model = classifier();
        let x = FeatureVector::new(3, vec![(0, 1.0)]).unwrap();
        assert_eq!(model.predict(&x).unwrap(), vec![true, false]);
    }

    #[test]
    fn rejects_wrong_input_dimension() {
        let model = classifier();
        let err = model.decision_function(&FeatureVector::zeros(4)).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 3,
                actual: 4,
                ..
            }
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = LinearOvrClassifier::from_spec(LinearSpec {
            coef: vec![vec![1.0, 2.0], vec![1.0]],
            intercept: vec![0.0, 0.0],
        })
        .unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn rejects_intercept_mismatch() {
        let err = LinearOvrClassifier::from_spec(LinearSpec {
            coef: vec![vec![1.0], vec![1.0]],
            intercept: vec![0.0],
        })
        .unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }

    #[test]
    fn rejects_empty_and_non_finite() {
        assert!(LinearOvrClassifier::from_spec(LinearSpec {
            coef: vec![],
            intercept: vec![],
        })
        .is_err());
        assert!(LinearOvrClassifier::from_spec(LinearSpec {
            coef: vec![vec![f64::NAN]],
            intercept: vec![0.0],
        })
        .is_err());
    }

    #[test]
    fn same_input_same_scores() {
        let model = classifier();
        let x = FeatureVector::new(3, vec![(1, 0.7), (2, 0.1)]).unwrap();
        assert_eq!(
            model.decision_function(&x).unwrap(),
            model.decision_function(&x).unwrap()
        );
    }
}
