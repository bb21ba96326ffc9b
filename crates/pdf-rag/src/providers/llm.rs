//! LLM provider trait for generating answers

use async_trait::async_trait;
use crate::error::Result;
use crate::types::GenerationParams;

/// Trait for single-turn text generation
///
/// Implementations:
/// - `GeminiLlm`: Google Generative Language API (gemini-2.0-flash)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a prompt and return the model's text verbatim
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String>;

    /// Check if the provider is configured and usable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
