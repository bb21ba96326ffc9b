//! Request types for the Document and Answer services

use serde::{Deserialize, Serialize};

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Default generation temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

fn default_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

/// POST /search body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query
    pub query: String,
    /// Maximum number of results (default: 5)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// POST /ask body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    /// Question or composed prompt
    pub question: String,
    /// Sampling temperature (default: 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional output token cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl AskRequest {
    /// Generation parameters carried by this request
    pub fn params(&self) -> GenerationParams {
        GenerationParams {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// POST /generate-embedding body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub text: String,
}

/// Parameters forwarded to the generative model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
        }
    }
}
