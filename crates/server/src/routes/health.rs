use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

const SERVICE: &str = "cinematch-server";

fn component(ready: bool) -> &'static str {
    if ready {
        "ready"
    } else {
        "unavailable"
    }
}

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
    }))
}

/// Readiness check endpoint
///
/// Always 200; a component that failed at startup is reported as
/// `unavailable` and the overall status as `degraded`.
pub async fn readiness_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let classifier_ready = state.classifier.is_ready();
    let assistant_ready = state.assistant.is_ready();
    let status = if classifier_ready && assistant_ready {
        "ready"
    } else {
        "degraded"
    };

    Json(json!({
        "status": status,
        "service": SERVICE,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "components": {
            "classifier": component(classifier_ready),
            "assistant": component(assistant_ready),
        },
        "decision_policy": state.classifier.policy().name(),
        "chat_model": state.assistant.model_name(),
    }))
}
