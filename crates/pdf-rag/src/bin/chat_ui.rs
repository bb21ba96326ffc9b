//! Chat UI binary
//!
//! Run with: cargo run -p pdf-rag --bin chat-ui

use pdf_rag::{
    config::RagConfig,
    server::{self, state::ChatUiState, CHAT_UI_PORT},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = RagConfig::from_env()?;

    let addr = config.server.address(CHAT_UI_PORT);
    let state = ChatUiState::new(config)?;

    println!("\nOpen http://{} in a browser\n", addr);
    server::serve("chat UI", server::chat_ui_router(state), &addr).await?;
    Ok(())
}
