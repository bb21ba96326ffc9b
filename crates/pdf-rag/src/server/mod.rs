//! HTTP servers for the document, answer, and chat UI services

pub mod routes;
pub mod state;

use axum::Router;
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::{Error, Result};
use state::{AnswerState, ChatUiState, DocumentState};

/// Default listener ports
pub const DOCUMENT_SERVICE_PORT: u16 = 8000;
pub const ANSWER_SERVICE_PORT: u16 = 8001;
pub const CHAT_UI_PORT: u16 = 8501;

/// Shared middleware stack (applied bottom to top)
fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Document Service router
pub fn document_router(state: DocumentState) -> Router {
    let max_upload_size = state.config().server.max_upload_size;
    with_layers(routes::document_routes(max_upload_size).with_state(state))
}

/// Answer Service router
pub fn answer_router(state: AnswerState) -> Router {
    with_layers(routes::answer_routes().with_state(state))
}

/// Chat UI router
pub fn chat_ui_router(state: ChatUiState) -> Router {
    let max_upload_size = state.config().server.max_upload_size;
    with_layers(routes::chat_ui_routes(max_upload_size).with_state(state))
}

/// Bind `addr` and serve `router` until the process exits
pub async fn serve(name: &str, router: Router, addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| Error::Config(format!("Invalid address {}: {}", addr, e)))?;

    tracing::info!("Starting {} on http://{}", name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
