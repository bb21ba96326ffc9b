//! Response types for the Document and Answer services

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome tag of a status response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Info,
    Error,
}

/// `{status, message}` body used by bootstrap and upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: StatusKind,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: StatusKind::Error,
            message: message.into(),
        }
    }

    /// True for success and info
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, StatusKind::Error)
    }
}

/// One similarity search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Point identifier as a string
    pub id: String,
    /// Cosine similarity (higher is closer)
    pub score: f32,
    /// Chunk text
    pub text: String,
    /// Page, source and chunk index when present in the payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// GET /health on the Document Service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHealth {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "connected" or "disconnected"
    pub qdrant: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentHealth {
    pub fn connected() -> Self {
        Self {
            status: "healthy".to_string(),
            qdrant: "connected".to_string(),
            error: None,
        }
    }

    pub fn disconnected(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            qdrant: "disconnected".to_string(),
            error: Some(error.into()),
        }
    }
}

/// GET /health on the Answer Service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerHealth {
    /// "healthy" or "unhealthy"
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnswerHealth {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            status: "unhealthy".to_string(),
            error: Some(error.into()),
        }
    }
}

/// POST /ask response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

/// POST /generate-embedding response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}
