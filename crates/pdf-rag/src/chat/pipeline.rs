//! Retrieve → template → generate loop behind the chat box

use std::sync::Arc;

use crate::generation::PromptBuilder;
use crate::types::AskRequest;

use super::client::{AnswerServiceClient, DocumentServiceClient};

/// Assistant reply when retrieval finds nothing
pub const NO_CONTEXT_REPLY: &str =
    "I could not find relevant information in the documents to answer your question.";

/// Assistant reply when a backend call fails
pub const APOLOGY_REPLY: &str = "Sorry, I could not generate an answer.";

/// Result of one chat exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The answer service replied
    Answered(String),
    /// Search returned no context; the answer service was not called
    NoContext,
    /// Search or generation failed
    UpstreamError(String),
}

impl ChatOutcome {
    /// Text recorded as the assistant turn
    pub fn reply(&self) -> &str {
        match self {
            ChatOutcome::Answered(answer) => answer,
            ChatOutcome::NoContext => NO_CONTEXT_REPLY,
            ChatOutcome::UpstreamError(_) => APOLOGY_REPLY,
        }
    }

    /// Error to surface in a banner, if any
    pub fn error(&self) -> Option<&str> {
        match self {
            ChatOutcome::UpstreamError(message) => Some(message),
            _ => None,
        }
    }
}

/// The RAG chat loop over the two backend services
pub struct RagChat {
    documents: Arc<dyn DocumentServiceClient>,
    answers: Arc<dyn AnswerServiceClient>,
    context_limit: usize,
    temperature: f32,
}

impl RagChat {
    pub fn new(
        documents: Arc<dyn DocumentServiceClient>,
        answers: Arc<dyn AnswerServiceClient>,
        context_limit: usize,
        temperature: f32,
    ) -> Self {
        Self {
            documents,
            answers,
            context_limit,
            temperature,
        }
    }

    /// Answer one user message
    pub async fn respond(&self, message: &str) -> ChatOutcome {
        let results = match self.documents.search(message, self.context_limit).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Context search failed: {}", e);
                return ChatOutcome::UpstreamError(format!("Error searching documents: {}", e));
            }
        };

        let context = PromptBuilder::build_context(&results);
        if context.is_empty() {
            tracing::info!("No context found for chat message");
            return ChatOutcome::NoContext;
        }

        let request = AskRequest {
            question: PromptBuilder::build_rag_prompt(&context, message),
            temperature: self.temperature,
            max_tokens: None,
        };
        match self.answers.ask(&request).await {
            Ok(answer) => ChatOutcome::Answered(answer),
            Err(e) => {
                tracing::error!("Answer generation failed: {}", e);
                ChatOutcome::UpstreamError(format!("Error generating answer: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::types::{SearchResult, StatusResponse};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct FixedDocuments {
        results: Result<Vec<SearchResult>>,
    }

    #[async_trait]
    impl DocumentServiceClient for FixedDocuments {
        async fn create_collection(&self) -> Result<StatusResponse> {
            Ok(StatusResponse::info("exists"))
        }

        async fn upload_pdf(&self, _filename: &str, _data: Vec<u8>) -> Result<StatusResponse> {
            Ok(StatusResponse::success("ok"))
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>> {
            match &self.results {
                Ok(results) => Ok(results.clone()),
                Err(e) => Err(Error::vector_db(e.to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingAnswers {
        asked: Mutex<Vec<AskRequest>>,
        fail: bool,
    }

    #[async_trait]
    impl AnswerServiceClient for RecordingAnswers {
        async fn ask(&self, request: &AskRequest) -> Result<String> {
            self.asked.lock().push(request.clone());
            if self.fail {
                return Err(Error::upstream("answer service", 500, "quota"));
            }
            Ok("Revenue grew 12%.".to_string())
        }
    }

    fn hit(text: &str) -> SearchResult {
        SearchResult {
            id: "1".to_string(),
            score: 0.9,
            text: text.to_string(),
            metadata: None,
        }
    }

    fn chat(results: Result<Vec<SearchResult>>, answers: Arc<RecordingAnswers>) -> RagChat {
        RagChat::new(Arc::new(FixedDocuments { results }), answers, 5, 0.7)
    }

    #[tokio::test]
    async fn test_no_context_skips_generation() {
        let answers = Arc::new(RecordingAnswers::default());
        let outcome = chat(Ok(vec![]), answers.clone()).respond("anything?").await;

        assert_eq!(outcome, ChatOutcome::NoContext);
        assert_eq!(outcome.reply(), NO_CONTEXT_REPLY);
        assert!(answers.asked.lock().is_empty());
    }

    #[tokio::test]
    async fn test_answer_uses_templated_prompt() {
        let answers = Arc::new(RecordingAnswers::default());
        let results = vec![hit("Quarterly revenue grew 12%"), hit("Costs were flat")];
        let outcome = chat(Ok(results), answers.clone()).respond("How did revenue change?").await;

        assert_eq!(outcome, ChatOutcome::Answered("Revenue grew 12%.".to_string()));
        let asked = answers.asked.lock();
        assert_eq!(asked.len(), 1);
        assert!(asked[0]
            .question
            .contains("Quarterly revenue grew 12%\nCosts were flat"));
        assert!(asked[0].question.contains("User question: How did revenue change?"));
        assert_eq!(asked[0].temperature, 0.7);
    }

    #[tokio::test]
    async fn test_generation_failure_apologizes() {
        let answers = Arc::new(RecordingAnswers {
            fail: true,
            ..Default::default()
        });
        let outcome = chat(Ok(vec![hit("context")]), answers).respond("q").await;

        assert_eq!(outcome.reply(), APOLOGY_REPLY);
        assert!(outcome.error().unwrap().contains("quota"));
    }

    #[tokio::test]
    async fn test_search_failure_is_upstream_error() {
        let answers = Arc::new(RecordingAnswers::default());
        let outcome = chat(Err(Error::vector_db("down")), answers.clone())
            .respond("q")
            .await;

        assert!(matches!(outcome, ChatOutcome::UpstreamError(_)));
        assert!(answers.asked.lock().is_empty());
    }
}
