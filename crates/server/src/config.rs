use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use assistant::{GeminiConfig, DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
use cinematch::{DecisionPolicy, DEFAULT_FALLBACK_LABEL, DEFAULT_SCORE_THRESHOLD};
use model::{ArtifactPaths, DEFAULT_CLASSIFIER_FILE, DEFAULT_LABELS_FILE, DEFAULT_VECTORIZER_FILE};
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,

    #[serde(default = "default_classifier_file")]
    pub classifier_file: String,

    #[serde(default = "default_labels_file")]
    pub labels_file: String,

    /// `threshold` or `direct`
    #[serde(default = "default_decision_policy")]
    pub decision_policy: String,

    /// Cutoff for the threshold policy
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    /// Label returned by the direct policy when nothing is predicted
    #[serde(default = "default_label")]
    pub default_label: String,

    /// Replacement stopword list, one word per line
    #[serde(default)]
    pub stopwords_path: Option<PathBuf>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_gemini_api_base")]
    pub gemini_api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub gemini_timeout_secs: u64,

    /// Replacement system prompt for the chat assistant
    #[serde(default)]
    pub system_prompt_path: Option<PathBuf>,

    /// Falls back to `GEMINI_API_KEY` when unset
    #[serde(default, skip_serializing)]
    pub gemini_api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            model_dir: default_model_dir(),
            vectorizer_file: default_vectorizer_file(),
            classifier_file: default_classifier_file(),
            labels_file: default_labels_file(),
            decision_policy: default_decision_policy(),
            score_threshold: default_score_threshold(),
            default_label: default_label(),
            stopwords_path: None,
            gemini_model: default_gemini_model(),
            gemini_api_base: default_gemini_api_base(),
            gemini_timeout_secs: default_timeout_secs(),
            system_prompt_path: None,
            gemini_api_key: None,
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("port", &self.port)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_body_size_mb", &self.max_body_size_mb)
            .field("enable_cors", &self.enable_cors)
            .field("log_level", &self.log_level)
            .field("model_dir", &self.model_dir)
            .field("decision_policy", &self.decision_policy)
            .field("score_threshold", &self.score_threshold)
            .field("default_label", &self.default_label)
            .field("gemini_model", &self.gemini_model)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_deref().map(assistant::mask_secret),
            )
            .finish_non_exhaustive()
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `CINEMATCH_SERVER__*` environment variables, in that order.
    ///
    /// Values in `.env` replace variables already set in the process.
    pub fn load() -> anyhow::Result<Self> {
        load_dotenv(None);

        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("server").required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("CINEMATCH_SERVER").separator("__"));

        let mut config = Self::from_builder(builder)?;
        if config.gemini_api_key.is_none() {
            config.gemini_api_key = std::env::var("GEMINI_API_KEY").ok();
        }
        Ok(config)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> anyhow::Result<Self> {
        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the classifier cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        self.decision_policy().map(|_| ())
    }

    /// Decision policy named by `decision_policy`.
    pub fn decision_policy(&self) -> ServerResult<DecisionPolicy> {
        match self.decision_policy.trim().to_ascii_lowercase().as_str() {
            "threshold" => {
                if !self.score_threshold.is_finite() {
                    return Err(ServerError::Config(format!(
                        "score_threshold must be finite, got {}",
                        self.score_threshold
                    )));
                }
                Ok(DecisionPolicy::threshold(self.score_threshold))
            }
            "direct" => {
                let label = self.default_label.trim();
                if label.is_empty() {
                    return Err(ServerError::Config(
                        "default_label must not be empty".into(),
                    ));
                }
                Ok(DecisionPolicy::direct(label))
            }
            other => Err(ServerError::Config(format!(
                "unknown decision_policy {other:?}, expected \"threshold\" or \"direct\""
            ))),
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            vectorizer: self.model_dir.join(&self.vectorizer_file),
            classifier: self.model_dir.join(&self.classifier_file),
            labels: self.model_dir.join(&self.labels_file),
        }
    }

    /// Gemini settings, or `None` when no usable key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let key = self.gemini_api_key.as_deref()?.trim();
        if key.is_empty() {
            return None;
        }
        Some(GeminiConfig {
            api_key: key.to_string(),
            model: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            timeout_secs: self.gemini_timeout_secs,
            ..GeminiConfig::default()
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_vectorizer_file() -> String {
    DEFAULT_VECTORIZER_FILE.to_string()
}

fn default_classifier_file() -> String {
    DEFAULT_CLASSIFIER_FILE.to_string()
}

fn default_labels_file() -> String {
    DEFAULT_LABELS_FILE.to_string()
}

fn default_decision_policy() -> String {
    "threshold".to_string()
}

fn default_score_threshold() -> f64 {
    DEFAULT_SCORE_THRESHOLD
}

fn default_label() -> String {
    DEFAULT_FALLBACK_LABEL.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

/// Applies a dotenv file over the process environment, overriding existing
/// variables. Without a path, `.env` is searched from the working directory up.
fn load_dotenv(path: Option<&Path>) -> Option<PathBuf> {
    let loaded = match path {
        Some(path) => dotenvy::from_path_override(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv_override(),
    };
    match loaded {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Some(path)
        }
        Err(err) if err.not_found() => None,
        Err(err) => {
            tracing::warn!(error = %err, "failed to load .env");
            None
        }
    }
}

fn default_gemini_api_base() -> String {
    DEFAULT_GEMINI_API_BASE.to_string()
}
