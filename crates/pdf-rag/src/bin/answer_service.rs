//! Answer Service binary
//!
//! Run with: cargo run -p pdf-rag --bin answer-service

use pdf_rag::{
    config::RagConfig,
    server::{self, state::AnswerState, ANSWER_SERVICE_PORT},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = RagConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Generation model: {}", config.gemini.generation_model);
    tracing::info!("  - Embedding model: {}", config.gemini.embedding_model);

    let addr = config.server.address(ANSWER_SERVICE_PORT);
    let state = AnswerState::new(config)?;

    server::serve("answer service", server::answer_router(state), &addr).await?;
    Ok(())
}
