use std::sync::Arc;
use std::time::Instant;

use assistant::{load_system_prompt, ChatAssistant, SYSTEM_PROMPT};
use cinematch::{ArtifactStore, GenreClassifier, NormalizerConfig, TextNormalizer};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared application state, built once at startup.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Genre pipeline; unavailable when the artifacts failed to load
    pub classifier: GenreClassifier,

    /// Chat assistant; unavailable without an API key
    pub assistant: ChatAssistant,

    pub started_at: Instant,
}

impl ServerState {
    /// Create new server state
    ///
    /// Missing or broken model artifacts do not fail startup: the error is
    /// logged and prediction requests are answered with a 500. A bad
    /// stopword or prompt override file is a configuration error.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let policy = config.decision_policy()?;

        let normalizer = match &config.stopwords_path {
            Some(path) => TextNormalizer::from_stopword_file(path, NormalizerConfig::default())
                .map_err(|err| {
                    ServerError::Config(format!("stopwords {}: {err}", path.display()))
                })?,
            None => TextNormalizer::default(),
        };

        let paths = config.artifact_paths();
        let artifacts = match ArtifactStore::load(&paths) {
            Ok(store) => Some(Arc::new(store)),
            Err(err) => {
                tracing::error!(
                    error = %err,
                    model_dir = %config.model_dir.display(),
                    "error loading models"
                );
                None
            }
        };
        let classifier = GenreClassifier::new(artifacts, normalizer, policy);

        let system_prompt = match &config.system_prompt_path {
            Some(path) => load_system_prompt(path).map_err(|err| {
                ServerError::Config(format!("system prompt {}: {err}", path.display()))
            })?,
            None => SYSTEM_PROMPT.to_string(),
        };
        let assistant =
            ChatAssistant::from_gemini_config(config.gemini_config().as_ref(), system_prompt);

        Ok(Self::from_parts(config, classifier, assistant))
    }

    /// Assemble state from ready-made parts.
    pub fn from_parts(
        config: ServerConfig,
        classifier: GenreClassifier,
        assistant: ChatAssistant,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            assistant,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifacts_do_not_fail_startup() {
        let config = ServerConfig {
            model_dir: "/definitely/not/a/model/dir".into(),
            ..Default::default()
        };
        let state = ServerState::new(config).unwrap();
        assert!(!state.classifier.is_ready());
        assert!(!state.assistant.is_ready());
        assert_eq!(state.assistant.system_prompt(), SYSTEM_PROMPT);
    }

    #[test]
    fn bad_stopword_file_is_config_error() {
        let config = ServerConfig {
            stopwords_path: Some("/definitely/not/stopwords.txt".into()),
            ..Default::default()
        };
        assert!(matches!(
            ServerState::new(config),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn prompt_override_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prompt.txt");
        std::fs::write(&path, "Only talk about westerns.").unwrap();
        let config = ServerConfig {
            model_dir: dir.path().to_path_buf(),
            system_prompt_path: Some(path),
            ..Default::default()
        };
        let state = ServerState::new(config).unwrap();
        assert_eq!(state.assistant.system_prompt(), "Only talk about westerns.");
    }
}
