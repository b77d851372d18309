//! Workspace umbrella crate for Cinematch genre prediction.
//!
//! This crate stitches the normalizer and the model artifacts into a single
//! classification entry point: synopsis in, genre labels out.
//!
//! ```no_run
//! use cinematch::{ArtifactStore, GenreClassifier};
//!
//! let store = ArtifactStore::load_dir("models").expect("artifacts");
//! let classifier = GenreClassifier::with_artifacts(store);
//! let prediction = classifier.classify("A detective hunts a killer in a rainy city.")?;
//! println!("{}", prediction.joined());
//! # Ok::<(), cinematch::PipelineError>(())
//! ```

mod policy;

pub use model::{
    ArtifactPaths, ArtifactStore, FeatureExtractor, FeatureVector, LabelBinarizer, LabelSpec,
    LinearOvrClassifier, LinearSpec, ModelError, MultiLabelModel, Norm, TfidfSpec,
    TfidfVectorizer,
};
pub use normalize::{NormalizeError, NormalizerConfig, TextNormalizer, normalize_text};
pub use policy::{
    DEFAULT_FALLBACK_LABEL, DEFAULT_SCORE_THRESHOLD, DecisionPolicy, Prediction, select_by_threshold,
    select_direct,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors that can occur while classifying a synopsis.
///
/// The display strings of the first two variants are the messages the HTTP
/// API returns verbatim.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Models not loaded correctly on server.")]
    ArtifactUnavailable,
    #[error("No text provided")]
    EmptyInput,
    #[error("{0}")]
    Prediction(#[from] ModelError),
}

/// Metrics observer for classification requests.
pub trait PipelineMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, tokens: usize);
    fn record_classify(&self, latency: Duration, result: Result<&Prediction, &PipelineError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_normalize(self, tokens: usize) {
        self.recorder.record_normalize(self.start.elapsed(), tokens);
    }

    fn record_classify(self, result: Result<&Prediction, &PipelineError>) {
        self.recorder.record_classify(self.start.elapsed(), result);
    }
}

/// Synopsis → genre labels.
///
/// Holds the artifact store (or its absence when loading failed at startup),
/// the normalizer and the decision policy. Everything is immutable after
/// construction; clone freely or share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct GenreClassifier {
    artifacts: Option<Arc<ArtifactStore>>,
    normalizer: TextNormalizer,
    policy: DecisionPolicy,
}

impl GenreClassifier {
    pub fn new(
        artifacts: Option<Arc<ArtifactStore>>,
        normalizer: TextNormalizer,
        policy: DecisionPolicy,
    ) -> Self {
        Self {
            artifacts,
            normalizer,
            policy,
        }
    }

    /// Default normalizer and threshold policy over `store`.
    pub fn with_artifacts(store: ArtifactStore) -> Self {
        Self::new(
            Some(Arc::new(store)),
            TextNormalizer::default(),
            DecisionPolicy::default(),
        )
    }

    /// A classifier whose artifacts failed to load. Every call answers
    /// [`PipelineError::ArtifactUnavailable`].
    pub fn unavailable() -> Self {
        Self::new(None, TextNormalizer::default(), DecisionPolicy::default())
    }

    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.artifacts.is_some()
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    pub fn artifacts(&self) -> Option<&ArtifactStore> {
        self.artifacts.as_deref()
    }

    /// Predicts genres for `synopsis`.
    ///
    /// Artifact availability is checked before the input, so an unloaded
    /// classifier answers `ArtifactUnavailable` even for empty text.
    pub fn classify<'a>(
        &self,
        synopsis: impl Into<Option<&'a str>>,
    ) -> Result<Prediction, PipelineError> {
        let span = MetricsSpan::start();
        let result = self.classify_inner(synopsis.into());
        if let Some(span) = span {
            span.record_classify(result.as_ref());
        }
        result
    }

    fn classify_inner(&self, synopsis: Option<&str>) -> Result<Prediction, PipelineError> {
        let store = self
            .artifacts
            .as_deref()
            .ok_or(PipelineError::ArtifactUnavailable)?;

        let synopsis = match synopsis {
            Some(text) if !text.is_empty() => text,
            _ => return Err(PipelineError::EmptyInput),
        };

        let normalize_span = MetricsSpan::start();
        let tokens = self.normalizer.tokens(synopsis);
        if let Some(span) = normalize_span {
            span.record_normalize(tokens.len());
        }

        let document = tokens.join(" ");
        let features = store.vectorizer().transform(&document)?;
        let prediction = self.policy.apply(store, &features)?;

        tracing::debug!(
            tokens = tokens.len(),
            nnz = features.nnz(),
            policy = self.policy.name(),
            labels = %prediction.joined(),
            fallback = prediction.fallback,
            "classified synopsis"
        );
        Ok(prediction)
    }
}
