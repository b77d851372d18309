use model::{ArtifactStore, FeatureVector, LabelBinarizer, ModelError};
use serde::{Deserialize, Serialize};

/// Score cutoff used by the shipped model.
pub const DEFAULT_SCORE_THRESHOLD: f64 = 0.2;

/// Label returned by [`DecisionPolicy::Direct`] when nothing is predicted.
pub const DEFAULT_FALLBACK_LABEL: &str = "Drama";

/// How decision scores become a label set.
///
/// Both variants always return at least one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionPolicy {
    /// Select every label whose decision score is `>= threshold`; if none
    /// qualifies, select the single highest-scoring label.
    Threshold { threshold: f64 },
    /// Use the classifier's own binary prediction; if it predicts nothing,
    /// return `default_label`.
    Direct { default_label: String },
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        DecisionPolicy::Threshold {
            threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

/// Labels chosen for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prediction {
    /// Selected labels, in decoder order.
    pub labels: Vec<String>,
    /// True when the policy's fallback produced the labels.
    pub fallback: bool,
}

impl Prediction {
    /// Labels joined the way the HTTP API reports them: `"Action, Comedy"`.
    pub fn joined(&self) -> String {
        self.labels.join(", ")
    }
}

impl DecisionPolicy {
    pub fn threshold(threshold: f64) -> Self {
        DecisionPolicy::Threshold { threshold }
    }

    pub fn direct(default_label: impl Into<String>) -> Self {
        DecisionPolicy::Direct {
            default_label: default_label.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DecisionPolicy::Threshold { .. } => "threshold",
            DecisionPolicy::Direct { .. } => "direct",
        }
    }

    /// Scores `features` with the store's classifier and applies the policy.
    pub fn apply(
        &self,
        store: &ArtifactStore,
        features: &FeatureVector,
    ) -> Result<Prediction, ModelError> {
        match self {
            DecisionPolicy::Threshold { threshold } => {
                let scores = store.classifier().decision_function(features)?;
                select_by_threshold(&scores, *threshold, store.labels())
            }
            DecisionPolicy::Direct { default_label } => {
                let predicted = store.classifier().predict(features)?;
                select_direct(&predicted, default_label, store.labels())
            }
        }
    }
}

/// Threshold rule over raw scores, with the arg-max fallback. Ties resolve to
/// the lowest index.
pub fn select_by_threshold(
    scores: &[f64],
    threshold: f64,
    labels: &LabelBinarizer,
) -> Result<Prediction, ModelError> {
    let selected: Vec<bool> = scores.iter().map(|score| *score >= threshold).collect();
    let chosen = labels.inverse_transform(&selected)?;
    if !chosen.is_empty() {
        return Ok(Prediction {
            labels: chosen,
            fallback: false,
        });
    }

    let top = argmax(scores)
        .and_then(|index| labels.label(index))
        .ok_or_else(|| ModelError::Inference("classifier returned no scores".into()))?;
    Ok(Prediction {
        labels: vec![top.to_string()],
        fallback: true,
    })
}

/// Direct rule over binary predictions, with the fixed default fallback.
pub fn select_direct(
    predicted: &[bool],
    default_label: &str,
    labels: &LabelBinarizer,
) -> Result<Prediction, ModelError> {
    let chosen = labels.inverse_transform(predicted)?;
    if chosen.is_empty() {
        return Ok(Prediction {
            labels: vec![default_label.to_string()],
            fallback: true,
        });
    }
    Ok(Prediction {
        labels: chosen,
        fallback: false,
    })
}

fn argmax(scores: &[f64]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best: Option<(usize, f64)>, (index, &score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((index, score)),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_genres() -> LabelBinarizer {
        LabelBinarizer::new(["Action", "Comedy", "Drama", "Horror", "Romance"]).unwrap()
    }

    #[test]
    fn threshold_selects_every_label_at_or_above_cutoff() {
        let labels = five_genres();
        let prediction =
            select_by_threshold(&[0.5, 0.2, -1.0, 0.19, 0.8], 0.2, &labels).unwrap();
        assert_eq!(prediction.labels, vec!["Action", "Comedy", "Romance"]);
        assert!(!prediction.fallback);
    }

    #[test]
    fn threshold_all_zero_scores_fall_back_to_first_label() {
        let labels = five_genres();
        let prediction = select_by_threshold(&[0.0; 5], 0.2, &labels).unwrap();
        assert_eq!(prediction.labels, vec!["Action"]);
        assert!(prediction.fallback);
    }

    #[test]
    fn threshold_fallback_picks_highest_score() {
        let labels = five_genres();
        let prediction =
            select_by_threshold(&[-0.9, -0.3, -0.1, -0.1, -2.0], 0.2, &labels).unwrap();
        assert_eq!(prediction.joined(), "Drama");
        assert!(prediction.fallback);
    }

    #[test]
    fn threshold_rejects_score_length_mismatch() {
        let labels = five_genres();
        assert!(select_by_threshold(&[1.0, 1.0], 0.2, &labels).is_err());
    }

    #[test]
    fn direct_uses_model_bits() {
        let labels = five_genres();
        let prediction =
            select_direct(&[false, true, false, true, false], "Drama", &labels).unwrap();
        assert_eq!(prediction.joined(), "Comedy, Horror");
        assert!(!prediction.fallback);
    }

    #[test]
    fn direct_all_zero_returns_default_label() {
        let labels = five_genres();
        let prediction = select_direct(&[false; 5], DEFAULT_FALLBACK_LABEL, &labels).unwrap();
        assert_eq!(prediction.joined(), "Drama");
        assert!(prediction.fallback);
    }

    #[test]
    fn direct_default_need_not_be_a_known_class() {
        let labels = LabelBinarizer::new(["Action", "Comedy"]).unwrap();
        let prediction = select_direct(&[false, false], "Drama", &labels).unwrap();
        assert_eq!(prediction.labels, vec!["Drama"]);
    }

    #[test]
    fn argmax_prefers_first_of_ties_and_skips_nan() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax(&[f64::NAN, -1.0, -0.5]), Some(2));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn default_policy_is_threshold_point_two() {
        assert_eq!(DecisionPolicy::default(), DecisionPolicy::threshold(0.2));
        assert_eq!(DecisionPolicy::default().name(), "threshold");
        assert_eq!(DecisionPolicy::direct("Drama").name(), "direct");
    }

    #[test]
    fn joined_uses_comma_space() {
        let prediction = Prediction {
            labels: vec!["Action".into(), "Science Fiction".into()],
            fallback: false,
        };
        assert_eq!(prediction.joined(), "Action, Science Fiction");
    }
}
