//! Document Service binary
//!
//! Run with: cargo run -p pdf-rag --bin document-service

use pdf_rag::{
    config::RagConfig,
    server::{self, state::DocumentState, DOCUMENT_SERVICE_PORT},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = RagConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Backend: {:?}", config.backend);
    tracing::info!("  - Qdrant: {}", config.qdrant.base_url());
    tracing::info!("  - Collection: {}", config.qdrant.collection);
    tracing::info!("  - Embedding model: {}", config.gemini.embedding_model);
    tracing::info!(
        "  - Chunking: {} chars, {} overlap",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );

    let addr = config.server.address(DOCUMENT_SERVICE_PORT);
    let state = DocumentState::new(config).await?;

    server::serve("document service", server::document_router(state), &addr).await?;
    Ok(())
}
