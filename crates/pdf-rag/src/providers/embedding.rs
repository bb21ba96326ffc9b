//! Embedding provider trait for generating text embeddings

use async_trait::async_trait;
use crate::error::Result;

/// Trait for generating text embeddings
///
/// Ingestion and search must use the same provider and model; vectors from
/// different models are not comparable.
///
/// Implementations:
/// - `GeminiEmbedder`: Google Generative Language API (embedding-001)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get embedding dimensions (768 for embedding-001)
    fn dimensions(&self) -> usize;

    /// Check if the provider is configured and usable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
