use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use cinematch::PipelineError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Request to classify a synopsis
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Plot synopsis; non-string values are rendered as text, falsy ones
    /// are treated as empty
    #[serde(default, deserialize_with = "super::text_field")]
    pub text: Option<String>,
}

/// Predicted genres, joined with `", "` in label order
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub genre: String,
}

/// Predict genres for a synopsis
///
/// Artifact availability is checked before the body is looked at, so an
/// unloaded model answers 500 for any request.
pub async fn predict_genre(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ServerResult<Json<PredictResponse>> {
    if !state.classifier.is_ready() {
        return Err(PipelineError::ArtifactUnavailable.into());
    }

    let Json(request) = payload.map_err(ServerError::from)?;
    let prediction = state
        .classifier
        .classify(request.text.as_deref())
        .inspect_err(|err| {
            if let PipelineError::Prediction(err) = err {
                tracing::error!(error = %err, "prediction error");
            }
        })?;

    Ok(Json(PredictResponse {
        genre: prediction.joined(),
    }))
}
