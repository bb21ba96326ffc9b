//! Answer Service endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::Result;
use crate::server::state::AnswerState;
use crate::types::{AskRequest, AskResponse, EmbeddingRequest, EmbeddingResponse};

use super::prefixed_error;

/// POST /ask
pub async fn ask(
    State(state): State<AnswerState>,
    payload: std::result::Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    Ok(match state.answers().ask(&request).await {
        Ok(answer) => Json(AskResponse { answer }).into_response(),
        Err(e) => {
            tracing::error!("Error processing question: {}", e);
            prefixed_error("Error processing question", e)
        }
    })
}

/// POST /generate-embedding
pub async fn generate_embedding(
    State(state): State<AnswerState>,
    payload: std::result::Result<Json<EmbeddingRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(request) = payload?;
    Ok(match state.answers().embed(&request.text).await {
        Ok(embedding) => Json(EmbeddingResponse { embedding }).into_response(),
        Err(e) => {
            tracing::error!("Error generating embedding: {}", e);
            prefixed_error("Error generating embedding", e)
        }
    })
}

/// GET /health
pub async fn health(State(state): State<AnswerState>) -> impl IntoResponse {
    Json(state.answers().health().await)
}
