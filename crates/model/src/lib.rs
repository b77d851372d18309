//! Cinematch model artifacts.
//!
//! Three immutable pieces make up the genre model:
//!
//! - **Vectorizer** ([`TfidfVectorizer`]): vocabulary plus IDF weights,
//!   turning a normalized synopsis into a fixed-length sparse vector
//! - **Classifier** ([`LinearOvrClassifier`]): one linear boundary per label,
//!   producing raw decision scores or binary predictions
//! - **Label decoder** ([`LabelBinarizer`]): the ordered genre names
//!
//! They are exported from the training toolkit as JSON and loaded together
//! into an [`ArtifactStore`], which refuses pieces whose shapes do not line up.
//! Nothing here mutates after load, so a store can be shared across threads
//! behind an `Arc` without locking.
//!
//! ```no_run
//! use model::ArtifactStore;
//!
//! let store = ArtifactStore::load_dir("models").expect("artifacts");
//! let features = store.vectorizer().transform("alien ship crew").unwrap();
//! let scores = store.classifier().decision_function(&features).unwrap();
//! assert_eq!(scores.len(), store.labels().len());
//! ```
//!
//! The vectorizer and classifier sit behind the [`FeatureExtractor`] and
//! [`MultiLabelModel`] traits so callers can plug in fakes.

mod artifacts;
mod error;
mod labels;
mod linear;
mod tfidf;
mod types;

pub use crate::artifacts::{
    ArtifactPaths, ArtifactStore, DEFAULT_CLASSIFIER_FILE, DEFAULT_LABELS_FILE,
    DEFAULT_VECTORIZER_FILE,
};
pub use crate::error::ModelError;
pub use crate::labels::{LabelBinarizer, LabelSpec};
pub use crate::linear::{LinearOvrClassifier, LinearSpec};
pub use crate::tfidf::{TfidfSpec, TfidfVectorizer};
pub use crate::types::{FeatureExtractor, FeatureVector, MultiLabelModel, Norm};
