use std::net::SocketAddr;

use assistant::{
    AssistantError, ChatAssistant, ChatOutcome, GeminiClient, GeminiConfig, GenerativeClient,
    APOLOGY,
};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde_json::{json, Value};

const MODEL: &str = "gemini-test";
const KEY: &str = "test-key-0123456789";

/// Fake Gemini endpoint: checks path and key, echoes the prompt back.
async fn fake_gemini(uri: Uri, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if uri.path() != "/v1beta/models/gemini-test:generateContent" {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "unknown path"})));
    }
    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(KEY) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"error": {"message": "API key not valid"}})),
        );
    }

    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "echo: "}, {"text": prompt}]},
                "finishReason": "STOP"
            }]
        })),
    )
}

async fn spawn_fake() -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().fallback(fake_gemini);
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    Ok(addr)
}

fn config(addr: SocketAddr, key: &str) -> GeminiConfig {
    GeminiConfig {
        api_key: key.to_string(),
        model: MODEL.to_string(),
        api_base: format!("http://{addr}/v1beta"),
        timeout_secs: 5,
        connect_timeout_secs: 2,
    }
}

#[tokio::test]
async fn generate_round_trips_through_http() -> anyhow::Result<()> {
    let addr = spawn_fake().await?;
    let client = GeminiClient::new(&config(addr, KEY))?;

    let text = client.generate("Who made this?").await?;

    assert_eq!(text, "echo: Who made this?");
    Ok(())
}

#[tokio::test]
async fn rejected_key_is_status_error() -> anyhow::Result<()> {
    let addr = spawn_fake().await?;
    let client = GeminiClient::new(&config(addr, "wrong-key-000000"))?;

    let err = client.generate("hi").await.unwrap_err();

    assert!(matches!(err, AssistantError::Status { status: 403, .. }));
    assert!(err.to_string().contains("API key not valid"));
    Ok(())
}

#[tokio::test]
async fn assistant_sends_system_prompt_first() -> anyhow::Result<()> {
    let addr = spawn_fake().await?;
    let cfg = config(addr, KEY);
    let assistant = ChatAssistant::from_gemini_config(Some(&cfg), "You are a test.");

    let outcome = assistant.reply("Where do I type?").await;

    match outcome {
        ChatOutcome::Answered(text) => {
            assert_eq!(text, "echo: You are a test.\nUser question: Where do I type?")
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unreachable_service_degrades() -> anyhow::Result<()> {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let assistant = ChatAssistant::from_gemini_config(Some(&config(addr, KEY)), "P");
    let outcome = assistant.reply("hello").await;

    assert!(matches!(outcome, ChatOutcome::Degraded(AssistantError::Transport(_))));
    assert_eq!(outcome.user_text(), APOLOGY);
    Ok(())
}
