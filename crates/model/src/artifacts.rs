use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ModelError;
use crate::labels::{LabelBinarizer, LabelSpec};
use crate::linear::{LinearOvrClassifier, LinearSpec};
use crate::tfidf::{TfidfSpec, TfidfVectorizer};
use crate::types::{FeatureExtractor, MultiLabelModel};

pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "movie_genre_multilabel_svm.json";
pub const DEFAULT_LABELS_FILE: &str = "genre_binarizer.json";

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub classifier: PathBuf,
    pub labels: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join(DEFAULT_VECTORIZER_FILE),
            classifier: dir.join(DEFAULT_CLASSIFIER_FILE),
            labels: dir.join(DEFAULT_LABELS_FILE),
        }
    }
}

/// The vectorizer, classifier and label decoder, loaded once and never
/// mutated.
///
/// Construction checks that the pieces fit together: the vectorizer
/// dimension equals the classifier's feature count and the classifier has one
/// row per label.
#[derive(Clone)]
pub struct ArtifactStore {
    vectorizer: Arc<dyn FeatureExtractor>,
    classifier: Arc<dyn MultiLabelModel>,
    labels: LabelBinarizer,
}

impl fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("features", &self.vectorizer.dim())
            .field("labels", &self.labels.classes())
            .finish()
    }
}

impl ArtifactStore {
    pub fn new(
        vectorizer: impl FeatureExtractor + 'static,
        classifier: impl MultiLabelModel + 'static,
        labels: LabelBinarizer,
    ) -> Result<Self, ModelError> {
        Self::from_shared(Arc::new(vectorizer), Arc::new(classifier), labels)
    }

    pub fn from_shared(
        vectorizer: Arc<dyn FeatureExtractor>,
        classifier: Arc<dyn MultiLabelModel>,
        labels: LabelBinarizer,
    ) -> Result<Self, ModelError> {
        if vectorizer.dim() != classifier.n_features() {
            return Err(ModelError::DimensionMismatch {
                what: "classifier features",
                expected: vectorizer.dim(),
                actual: classifier.n_features(),
            });
        }
        if classifier.n_labels() != labels.len() {
            return Err(ModelError::DimensionMismatch {
                what: "classifier labels",
                expected: labels.len(),
                actual: classifier.n_labels(),
            });
        }

        Ok(Self {
            vectorizer,
            classifier,
            labels,
        })
    }

    /// Reads and validates the three JSON artifacts.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ModelError> {
        let vectorizer = TfidfVectorizer::from_spec(read_json::<TfidfSpec>(&paths.vectorizer)?)?;
        let classifier =
            LinearOvrClassifier::from_spec(read_json::<LinearSpec>(&paths.classifier)?)?;
        let labels = LabelBinarizer::from_spec(read_json::<LabelSpec>(&paths.labels)?)?;

        let store = Self::new(vectorizer, classifier, labels)?;
        tracing::info!(
            features = store.vectorizer.dim(),
            labels = store.labels.len(),
            "loaded classifier artifacts"
        );
        Ok(store)
    }

    /// [`load`](Self::load) with the default file names inside `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ModelError> {
        Self::load(&ArtifactPaths::in_dir(dir))
    }

    pub fn vectorizer(&self) -> &dyn FeatureExtractor {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn MultiLabelModel {
        self.classifier.as_ref()
    }

    pub fn labels(&self) -> &LabelBinarizer {
        &self.labels
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let bytes = fs::read(path).map_err(|source| ModelError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
        path: path.display().to_string(),
        source,
    })
}
