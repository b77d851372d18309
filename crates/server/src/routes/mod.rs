//! API route handlers
//!
//! - `predict`: genre prediction from a synopsis
//! - `chat`: questions for the movie assistant
//! - `health`: liveness and readiness probes

pub mod chat;
pub mod health;
pub mod predict;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "Cinematch Server",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Cinematch Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/predict",
            "POST /api/chat",
            "GET /health",
            "GET /ready"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Reads a free-text request field from any JSON value.
///
/// Strings pass through and other values are rendered as text. `null`,
/// `false`, zero and empty arrays or objects read as absent, like an empty
/// string does.
pub(crate) fn text_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("True".to_string()),
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "text_field")]
        text: Option<String>,
    }

    fn text(raw: &str) -> Option<String> {
        serde_json::from_str::<Body>(raw).unwrap().text
    }

    #[test]
    fn strings_pass_through() {
        assert_eq!(text(r#"{"text": "A ghost story"}"#).as_deref(), Some("A ghost story"));
        assert_eq!(text(r#"{"text": "   "}"#).as_deref(), Some("   "));
        assert_eq!(text(r#"{"text": ""}"#).as_deref(), Some(""));
    }

    #[test]
    fn scalars_are_rendered_as_text() {
        assert_eq!(text(r#"{"text": 42}"#).as_deref(), Some("42"));
        assert_eq!(text(r#"{"text": true}"#).as_deref(), Some("True"));
        assert_eq!(text(r#"{"text": ["ghost"]}"#).as_deref(), Some(r#"["ghost"]"#));
    }

    #[test]
    fn falsy_values_read_as_absent() {
        for raw in [
            r#"{}"#,
            r#"{"text": null}"#,
            r#"{"text": false}"#,
            r#"{"text": 0}"#,
            r#"{"text": 0.0}"#,
            r#"{"text": []}"#,
            r#"{"text": {}}"#,
        ] {
            assert_eq!(text(raw), None, "body {raw}");
        }
    }
}
