//! Question answering and embedding passthrough

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider};
use crate::types::{AnswerHealth, AskRequest};

/// Forwards questions to the LLM and texts to the embedder
pub struct AnswerService {
    llm: Arc<dyn LlmProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl AnswerService {
    pub fn new(llm: Arc<dyn LlmProvider>, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { llm, embedder }
    }

    /// Answer a question with one LLM call, returning the text verbatim
    pub async fn ask(&self, request: &AskRequest) -> Result<String> {
        if request.question.trim().is_empty() {
            return Err(Error::validation("Question cannot be empty"));
        }

        let params = request.params();
        tracing::info!(
            "Asking {} (temperature {}, max_tokens {:?})",
            self.llm.model(),
            params.temperature,
            params.max_tokens
        );
        self.llm.generate(&request.question, params).await
    }

    /// Embed a single text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.is_empty() {
            return Err(Error::validation("Text cannot be empty"));
        }
        self.embedder.embed(text).await
    }

    /// Liveness of the generation provider
    pub async fn health(&self) -> AnswerHealth {
        match self.llm.health_check().await {
            Ok(true) => AnswerHealth::healthy(),
            Ok(false) => AnswerHealth::unhealthy(format!("{} is not configured", self.llm.name())),
            Err(e) => AnswerHealth::unhealthy(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenerationParams;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingLlm {
        seen: Mutex<Vec<(String, GenerationParams)>>,
    }

    #[async_trait]
    impl LlmProvider for RecordingLlm {
        async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String> {
            self.seen.lock().push((prompt.to_string(), params));
            Ok("  stub answer\n".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "recording"
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.25; 768])
        }

        fn dimensions(&self) -> usize {
            768
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn service() -> (Arc<RecordingLlm>, AnswerService) {
        let llm = Arc::new(RecordingLlm::default());
        (llm.clone(), AnswerService::new(llm, Arc::new(FixedEmbedder)))
    }

    #[tokio::test]
    async fn test_ask_returns_text_verbatim() {
        let (llm, service) = service();
        let request = AskRequest {
            question: "What grew?".to_string(),
            temperature: 0.0,
            max_tokens: Some(64),
        };

        let answer = service.ask(&request).await.unwrap();

        assert_eq!(answer, "  stub answer\n");
        let seen = llm.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "What grew?");
        assert_eq!(seen[0].1.temperature, 0.0);
        assert_eq!(seen[0].1.max_tokens, Some(64));
    }

    #[tokio::test]
    async fn test_empty_question_is_rejected() {
        let (llm, service) = service();
        let request = AskRequest {
            question: "   ".to_string(),
            temperature: 0.7,
            max_tokens: None,
        };

        assert!(matches!(service.ask(&request).await, Err(Error::Validation(_))));
        assert!(llm.seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_embed() {
        let (_, service) = service();
        assert_eq!(service.embed("hello").await.unwrap().len(), 768);
        assert!(service.embed("").await.is_err());
    }

    #[tokio::test]
    async fn test_health() {
        let (_, service) = service();
        assert_eq!(service.health().await.status, "healthy");
    }
}
