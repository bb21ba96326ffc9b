//! Gemini providers for embeddings and answer generation
//!
//! Both talk to the Generative Language REST API with an API key sent in
//! the `x-goog-api-key` header.

use async_trait::async_trait;

use crate::config::{EmbeddingConfig, GeminiConfig};
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;
use crate::providers::llm::LlmProvider;
use crate::types::GenerationParams;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini embedding provider (embedding-001, 768 dimensions)
pub struct GeminiEmbedder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

impl GeminiEmbedder {
    /// Create a new embedder
    pub fn new(
        client: reqwest::Client,
        config: &GeminiConfig,
        embeddings: &EmbeddingConfig,
    ) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.require_api_key()?.to_string(),
            model: config.embedding_model.clone(),
            dimensions: embeddings.dimensions,
        })
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:embedContent", self.base_url, self.model)
    }
}

#[derive(serde::Serialize)]
struct EmbedRequest {
    model: String,
    content: Content,
    #[serde(rename = "taskType")]
    task_type: &'static str,
}

#[derive(serde::Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(serde::Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            model: format!("models/{}", self.model),
            content: Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
            task_type: "RETRIEVAL_QUERY",
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Embedding(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Embedding(format!(
                "Gemini embedding failed ({}): {}",
                status, body
            )));
        }

        let embed_response: EmbedResponse = response
            .json()
            .await
            .map_err(|e| Error::Embedding(format!("Failed to parse Gemini response: {}", e)))?;

        Ok(embed_response.embedding.values)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.api_key.is_empty())
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini text generation provider
pub struct GeminiLlm {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiLlm {
    /// Create a new generation client
    pub fn new(client: reqwest::Client, config: &GeminiConfig) -> Result<Self> {
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.require_api_key()?.to_string(),
            model: config.generation_model.clone(),
        })
    }

    /// Get the API endpoint URL
    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl LlmProvider for GeminiLlm {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        };

        let preview: String = prompt.chars().take(100).collect();
        tracing::info!("Sending prompt to {}: {}...", self.model, preview);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Failed to parse Gemini response: {}", e)))?;

        let text: String = gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .ok_or_else(|| Error::Llm("No text in Gemini response".to_string()))?;

        tracing::info!("Response received ({} chars)", text.len());
        Ok(text)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.api_key.is_empty())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
