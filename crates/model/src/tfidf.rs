//! TF-IDF vectorizer restored from an exported vocabulary.
//!
//! The export carries the fitted state (term → column, per-column IDF) and the
//! transform parameters. Fitting is out of scope; this type only transforms.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::types::{FeatureExtractor, FeatureVector, Norm};

const ARTIFACT: &str = "tfidf vectorizer";

/// On-disk shape of the vectorizer artifact.
///
/// ```json
/// {
///   "vocabulary": {"alien": 0, "love": 1},
///   "idf": [2.1, 1.4],
///   "ngram_range": [1, 1],
///   "sublinear_tf": false,
///   "norm": "l2"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TfidfSpec {
    pub vocabulary: FxHashMap<String, usize>,
    #[serde(default)]
    pub idf: Vec<f64>,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub binary: bool,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

impl Default for TfidfSpec {
    fn default() -> Self {
        Self {
            vocabulary: FxHashMap::default(),
            idf: Vec::new(),
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            binary: false,
            use_idf: true,
            norm: default_norm(),
            lowercase: true,
        }
    }
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

fn default_true() -> bool {
    true
}

/// Validated, immutable TF-IDF transform.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    spec: TfidfSpec,
}

impl TfidfVectorizer {
    /// Validates `spec`: non-empty vocabulary, columns forming exactly
    /// `0..len`, one finite IDF weight per column when IDF is enabled, and a
    /// sane n-gram range.
    pub fn from_spec(spec: TfidfSpec) -> Result<Self, ModelError> {
        let dim = spec.vocabulary.len();
        if dim == 0 {
            return Err(ModelError::invalid(ARTIFACT, "vocabulary is empty"));
        }

        let mut seen = vec![false; dim];
        for (term, &col) in &spec.vocabulary {
            if col >= dim {
                return Err(ModelError::invalid(
                    ARTIFACT,
                    format!("term {term:?} maps to column {col} outside 0..{dim}"),
                ));
            }
            if std::mem::replace(&mut seen[col], true) {
                return Err(ModelError::invalid(
                    ARTIFACT,
                    format!("column {col} is assigned to more than one term"),
                ));
            }
        }

        if spec.use_idf {
            if spec.idf.len() != dim {
                return Err(ModelError::DimensionMismatch {
                    what: "idf weights",
                    expected: dim,
                    actual: spec.idf.len(),
                });
            }
            if spec.idf.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::invalid(ARTIFACT, "idf weights must be finite"));
            }
        }

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(ModelError::invalid(
                ARTIFACT,
                format!("invalid ngram_range ({min_n}, {max_n})"),
            ));
        }

        Ok(Self { spec })
    }

    pub fn spec(&self) -> &TfidfSpec {
        &self.spec
    }

    pub fn vocabulary_len(&self) -> usize {
        self.spec.vocabulary.len()
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.spec.vocabulary.get(term).copied()
    }

    fn term_counts(&self, document: &str) -> FxHashMap<usize, f64> {
        let lowered;
        let document = if self.spec.lowercase {
            lowered = document.to_lowercase();
            lowered.as_str()
        } else {
            document
        };

        let tokens = word_tokens(document);
        let (min_n, max_n) = self.spec.ngram_range;
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();

        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                let col = if n == 1 {
                    self.column(window[0])
                } else {
                    self.column(&window.join(" "))
                };
                if let Some(col) = col {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }
        }

        counts
    }
}

impl FeatureExtractor for TfidfVectorizer {
    fn dim(&self) -> usize {
        self.vocabulary_len()
    }

    fn transform(&self, document: &str) -> Result<FeatureVector, ModelError> {
        let entries = self
            .term_counts(document)
            .into_iter()
            .map(|(col, count)| {
                let mut tf = if self.spec.binary { 1.0 } else { count };
                if self.spec.sublinear_tf {
                    tf = 1.0 + tf.ln();
                }
                if self.spec.use_idf {
                    tf *= self.spec.idf[col];
                }
                (col, tf)
            })
            .collect();

        let mut vector = FeatureVector::new(self.dim(), entries)?;
        if let Some(norm) = self.spec.norm {
            vector.normalize(norm);
        }
        Ok(vector)
    }
}

/// Splits on anything that is not alphanumeric or `_`, keeping tokens of at
/// least two characters.
fn word_tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().nth(1).is_some())
        .collect()
}
