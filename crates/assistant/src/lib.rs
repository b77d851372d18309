//! Cinematch chat assistant.
//!
//! Answers questions about the Cinematch product by forwarding them to a
//! generative language service with a fixed knowledge prompt in front. There
//! is no conversation state: every message is a fresh, single-turn request.
//!
//! Three outcomes, always:
//!
//! - **Answered** - the model's text, passed through untouched
//! - **Degraded** - the call failed; the user gets a fixed apology and the
//!   error goes to the logs
//! - **Unavailable** - no API key or the client could not be built
//!
//! ```no_run
//! use assistant::{ChatAssistant, GeminiConfig, SYSTEM_PROMPT};
//!
//! #[tokio::main]
//! async fn main() {
//!     let cfg = GeminiConfig::with_api_key(std::env::var("GEMINI_API_KEY").unwrap_or_default());
//!     let assistant = ChatAssistant::from_gemini_config(Some(&cfg), SYSTEM_PROMPT);
//!     let outcome = assistant.reply("Where do I type my synopsis?").await;
//!     println!("{}", outcome.user_text());
//! }
//! ```
//!
//! The service sits behind [`GenerativeClient`], so tests and other providers
//! can swap in their own implementation.

mod chat;
mod client;
mod config;
mod error;
mod prompt;

pub use crate::chat::{mask_secret, ChatAssistant, ChatOutcome, APOLOGY, UNAVAILABLE_MESSAGE};
pub use crate::client::{GeminiClient, GenerativeClient};
pub use crate::config::{GeminiConfig, DEFAULT_GEMINI_API_BASE, DEFAULT_GEMINI_MODEL};
pub use crate::error::AssistantError;
pub use crate::prompt::{compose_prompt, load_system_prompt, SYSTEM_PROMPT};
