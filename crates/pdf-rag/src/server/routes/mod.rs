//! Routes for the document, answer, and chat UI services

pub mod answers;
pub mod chat_ui;
pub mod documents;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::error::Error;
use crate::server::state::{AnswerState, ChatUiState, DocumentState};

/// Document Service routes
pub fn document_routes(max_upload_size: usize) -> Router<DocumentState> {
    Router::new()
        .route("/create-collection", post(documents::create_collection))
        .route(
            "/upload-pdf",
            post(documents::upload_pdf).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/search", post(documents::search))
        .route("/health", get(documents::health))
}

/// Answer Service routes
pub fn answer_routes() -> Router<AnswerState> {
    Router::new()
        .route("/ask", post(answers::ask))
        .route("/generate-embedding", post(answers::generate_embedding))
        .route("/health", get(answers::health))
}

/// Chat UI routes
pub fn chat_ui_routes(max_upload_size: usize) -> Router<ChatUiState> {
    Router::new()
        .route("/", get(chat_ui::index))
        .route(
            "/upload",
            post(chat_ui::upload).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .route("/create-collection", post(chat_ui::create_collection))
        .route("/search", post(chat_ui::search))
        .route("/chat", post(chat_ui::chat))
}

/// Error body whose message carries an operation prefix
pub(crate) fn prefixed_error(prefix: &str, err: Error) -> Response {
    let (status, error_type) = err.status_and_type();
    let body = Json(json!({
        "status": "error",
        "message": format!("{}: {}", prefix, err),
        "error_type": error_type,
    }));
    (status, body).into_response()
}

/// A `{status, message}` body with an explicit status code
pub(crate) fn status_body(code: StatusCode, body: crate::types::StatusResponse) -> Response {
    (code, Json(body)).into_response()
}
