use std::sync::Arc;

use crate::client::{GeminiClient, GenerativeClient};
use crate::config::GeminiConfig;
use crate::error::AssistantError;
use crate::prompt::{compose_prompt, SYSTEM_PROMPT};

/// Returned to the user when the language service call fails.
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting to the AI brain right now.";

/// Returned to the user when no language service is configured.
pub const UNAVAILABLE_MESSAGE: &str =
    "Error: Gemini API Key missing or model failed to load. Please check server logs.";

/// Result of one chat turn.
#[derive(Debug)]
pub enum ChatOutcome {
    /// No client configured.
    Unavailable,
    /// The client failed; the user sees [`APOLOGY`].
    Degraded(AssistantError),
    /// The model's text, unmodified.
    Answered(String),
}

impl ChatOutcome {
    /// Text shown to the user.
    pub fn user_text(&self) -> &str {
        match self {
            ChatOutcome::Unavailable => UNAVAILABLE_MESSAGE,
            ChatOutcome::Degraded(_) => APOLOGY,
            ChatOutcome::Answered(text) => text,
        }
    }
}

/// Stateless question forwarder. Each message is answered on its own with the
/// fixed system prompt in front.
#[derive(Clone)]
pub struct ChatAssistant {
    client: Option<Arc<dyn GenerativeClient>>,
    system_prompt: Arc<str>,
}

impl std::fmt::Debug for ChatAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatAssistant")
            .field("model", &self.client.as_ref().map(|c| c.model_name()))
            .field("system_prompt_len", &self.system_prompt.len())
            .finish()
    }
}

impl ChatAssistant {
    pub fn new(client: Option<Arc<dyn GenerativeClient>>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
        }
    }

    /// Assistant with the built-in prompt around `client`.
    pub fn with_client(client: impl GenerativeClient + 'static) -> Self {
        Self::new(Some(Arc::new(client)), SYSTEM_PROMPT)
    }

    /// Assistant that answers every message with [`ChatOutcome::Unavailable`].
    pub fn unavailable() -> Self {
        Self::new(None, SYSTEM_PROMPT)
    }

    /// Builds a Gemini-backed assistant, or an unavailable one when the key is
    /// missing or the client cannot be built. Never fails.
    pub fn from_gemini_config(cfg: Option<&GeminiConfig>, system_prompt: impl Into<Arc<str>>) -> Self {
        let system_prompt = system_prompt.into();
        let Some(cfg) = cfg else {
            tracing::error!("GEMINI_API_KEY is not set; chat is disabled");
            return Self::new(None, system_prompt);
        };

        let key = cfg.api_key.trim();
        match GeminiClient::new(cfg) {
            Ok(client) => {
                tracing::info!(
                    key = %mask_secret(key),
                    key_len = key.len(),
                    model = %cfg.model,
                    "Gemini client configured"
                );
                Self::new(Some(Arc::new(client)), system_prompt)
            }
            Err(AssistantError::MissingApiKey) => {
                tracing::error!("GEMINI_API_KEY is blank; chat is disabled");
                Self::new(None, system_prompt)
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to configure Gemini client; chat is disabled");
                Self::new(None, system_prompt)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.client.as_deref().map(|client| client.model_name())
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Answers one message. Client errors are logged here and never reach the
    /// user beyond the apology.
    pub async fn reply(&self, message: &str) -> ChatOutcome {
        let Some(client) = self.client.as_deref() else {
            return ChatOutcome::Unavailable;
        };

        let prompt = compose_prompt(&self.system_prompt, message);
        match client.generate(&prompt).await {
            Ok(text) => ChatOutcome::Answered(text),
            Err(err) => {
                tracing::error!(error = %err, model = client.model_name(), "Gemini API error");
                ChatOutcome::Degraded(err)
            }
        }
    }
}

/// First five and last four characters around `...`; short secrets are fully
/// hidden.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() < 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingClient {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GenerativeClient for RecordingClient {
        async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("Head to /classify.".into())
        }

        fn model_name(&self) -> &str {
            "recording"
        }
    }

    struct FailingClient;

    #[async_trait]
    impl GenerativeClient for FailingClient {
        async fn generate(&self, _prompt: &str) -> Result<String, AssistantError> {
            Err(AssistantError::Transport("connection refused".into()))
        }

        fn model_name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn answered_text_passes_through() {
        let client = Arc::new(RecordingClient::default());
        let assistant = ChatAssistant::new(Some(client.clone()), "SYSTEM");

        let outcome = assistant.reply("How do I start?").await;

        assert!(matches!(&outcome, ChatOutcome::Answered(text) if text == "Head to /classify."));
        assert_eq!(
            client.prompts.lock().unwrap().as_slice(),
            &["SYSTEM\nUser question: How do I start?".to_string()]
        );
    }

    #[tokio::test]
    async fn failure_degrades_to_apology() {
        let assistant = ChatAssistant::with_client(FailingClient);
        let outcome = assistant.reply("hello").await;
        assert!(matches!(outcome, ChatOutcome::Degraded(AssistantError::Transport(_))));
        assert_eq!(outcome.user_text(), APOLOGY);
    }

    #[tokio::test]
    async fn missing_client_is_unavailable() {
        let assistant = ChatAssistant::unavailable();
        assert!(!assistant.is_ready());
        let outcome = assistant.reply("hello").await;
        assert!(matches!(outcome, ChatOutcome::Unavailable));
        assert_eq!(outcome.user_text(), UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn config_without_key_is_unavailable() {
        assert!(!ChatAssistant::from_gemini_config(None, SYSTEM_PROMPT).is_ready());
        let blank = GeminiConfig::with_api_key("  ");
        assert!(!ChatAssistant::from_gemini_config(Some(&blank), SYSTEM_PROMPT).is_ready());
    }

    #[test]
    fn config_with_key_is_ready() {
        let cfg = GeminiConfig::with_api_key("AIzaSyExampleExampleExample1234");
        let assistant = ChatAssistant::from_gemini_config(Some(&cfg), SYSTEM_PROMPT);
        assert!(assistant.is_ready());
        assert_eq!(assistant.model_name(), Some("gemini-2.5-flash-lite"));
        assert_eq!(assistant.system_prompt(), SYSTEM_PROMPT);
    }

    #[test]
    fn mask_keeps_edges_only() {
        assert_eq!(mask_secret("AIzaSyExampleExampleExample1234"), "AIzaS...1234");
        assert_eq!(mask_secret("short"), "*****");
        assert_eq!(mask_secret(""), "");
    }
}
