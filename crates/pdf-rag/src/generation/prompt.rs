//! Prompt templates for RAG generation

use crate::types::SearchResult;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build context from search results
    ///
    /// Chunk texts are joined with newlines in ranking order, unfiltered.
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the grounded prompt sent to the answer service
    pub fn build_rag_prompt(context: &str, question: &str) -> String {
        format!(
            r#"Based on the following context, answer the user's question clearly and concisely.
If the answer is not in the context, say that you do not have enough information.

Context:
{context}

User question: {question}

Answer:"#,
            context = context,
            question = question,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> SearchResult {
        SearchResult {
            id: "1".to_string(),
            score: 0.5,
            text: text.to_string(),
            metadata: None,
        }
    }

    #[test]
    fn test_build_context_joins_in_order() {
        let context = PromptBuilder::build_context(&[result("first"), result("second")]);
        assert_eq!(context, "first\nsecond");
    }

    #[test]
    fn test_build_context_empty() {
        assert!(PromptBuilder::build_context(&[]).is_empty());
    }

    #[test]
    fn test_rag_prompt_contains_context_and_question() {
        let prompt = PromptBuilder::build_rag_prompt("Revenue grew 12%.", "How did revenue change?");

        assert!(prompt.contains("Context:\nRevenue grew 12%."));
        assert!(prompt.contains("User question: How did revenue change?"));
        assert!(prompt.contains("do not have enough information"));
        assert!(prompt.ends_with("Answer:"));
    }
}
