use std::io;

use thiserror::Error;

/// Errors surfaced while building or calling the generative client.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// No API key, or only whitespace.
    #[error("Gemini API key is missing")]
    MissingApiKey,
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
    /// Connect, timeout or body transfer failure.
    #[error("HTTP request failed: {0}")]
    Transport(String),
    /// The service answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    /// Success status but no usable text in the body.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A system prompt override file holds no text.
    #[error("system prompt file {0} is empty")]
    EmptyPrompt(String),
    /// Reading a prompt override from disk failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        AssistantError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_body() {
        let err = AssistantError::Status {
            status: 403,
            body: "API key not valid".into(),
        };
        assert_eq!(err.to_string(), "HTTP error 403: API key not valid");
    }

    #[test]
    fn io_error_converts() {
        let err: AssistantError = io::Error::new(io::ErrorKind::NotFound, "prompt.txt").into();
        assert!(matches!(err, AssistantError::Io(_)));
    }
}
