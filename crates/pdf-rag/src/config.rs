//! Configuration for the RAG services

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "PDF_RAG_CONFIG";

/// Main configuration shared by all three services
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    /// Vector store backend (qdrant or memory)
    pub backend: VectorBackend,
    /// Listener configuration
    pub server: ServerConfig,
    /// Qdrant connection and collection settings
    pub qdrant: QdrantConfig,
    /// Gemini API settings (embeddings and generation)
    pub gemini: GeminiConfig,
    /// Embedding configuration
    pub embeddings: EmbeddingConfig,
    /// Chunking configuration
    pub chunking: ChunkingConfig,
    /// Upload handling and point id policy
    pub ingestion: IngestionConfig,
    /// Chat UI settings
    pub chat_ui: ChatUiConfig,
}

impl RagConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from the optional config file plus environment overrides
    ///
    /// A `.env` file in the working directory is loaded first if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("VECTOR_BACKEND") {
            self.backend = match backend.to_lowercase().as_str() {
                "qdrant" => VectorBackend::Qdrant,
                "memory" => VectorBackend::Memory,
                other => {
                    return Err(Error::Config(format!(
                        "VECTOR_BACKEND must be 'qdrant' or 'memory', got '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(key) = lookup("GEMINI_API_KEY") {
            self.gemini.api_key = Some(key);
        }
        if let Some(url) = lookup("GEMINI_BASE_URL") {
            self.gemini.base_url = url;
        }
        if let Some(url) = lookup("QDRANT_URL") {
            self.qdrant.url = Some(url);
        }
        if let Some(host) = lookup("QDRANT_HOST") {
            self.qdrant.host = host;
        }
        if let Some(port) = lookup("QDRANT_PORT") {
            self.qdrant.port = parse_var("QDRANT_PORT", &port)?;
        }
        if let Some(key) = lookup("QDRANT_API_KEY") {
            self.qdrant.api_key = Some(key);
        }
        if let Some(name) = lookup("COLLECTION_NAME") {
            self.qdrant.collection = name;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = Some(parse_var("PORT", &port)?);
        }
        if let Some(url) = lookup("DOCUMENT_SERVICE_URL") {
            self.chat_ui.document_service_url = url;
        }
        if let Some(url) = lookup("ANSWER_SERVICE_URL") {
            self.chat_ui.answer_service_url = url;
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            self.ingestion.upload_dir = PathBuf::from(dir);
        }
        if let Some(policy) = lookup("POINT_IDS") {
            self.ingestion.point_ids = match policy.to_lowercase().as_str() {
                "random" => PointIdPolicy::Random,
                "content" => PointIdPolicy::Content,
                other => {
                    return Err(Error::Config(format!(
                        "POINT_IDS must be 'random' or 'content', got '{}'",
                        other
                    )))
                }
            };
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS") {
            self.server.http_timeout_secs = Some(parse_var("HTTP_TIMEOUT_SECS", &secs)?);
        }
        Ok(())
    }

    /// Reject settings the services cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.chunking.chunk_size == 0 {
            return Err(Error::Config("chunking.chunk_size must be positive".into()));
        }
        if self.chunking.chunk_overlap >= self.chunking.chunk_size {
            return Err(Error::Config(format!(
                "chunking.chunk_overlap ({}) must be smaller than chunk_size ({})",
                self.chunking.chunk_overlap, self.chunking.chunk_size
            )));
        }
        if self.embeddings.dimensions == 0 {
            return Err(Error::Config("embeddings.dimensions must be positive".into()));
        }
        if self.chat_ui.context_limit == 0 {
            return Err(Error::Config("chat_ui.context_limit must be at least 1".into()));
        }
        if self.chat_ui.max_sessions == 0 {
            return Err(Error::Config("chat_ui.max_sessions must be at least 1".into()));
        }
        Ok(())
    }

    /// Build the outbound HTTP client shared by providers
    ///
    /// No timeout is set unless `server.http_timeout_secs` is configured.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.server.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} has an invalid value: '{}'", name, value)))
}

/// Vector store backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VectorBackend {
    /// Qdrant over REST
    #[default]
    Qdrant,
    /// Process-local store; contents are lost on restart
    Memory,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port override; each service has its own default
    pub port: Option<u16>,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
    /// Optional timeout for outbound HTTP calls
    pub http_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: None,
            max_upload_size: 50 * 1024 * 1024,
            http_timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Socket address for a service, falling back to its default port
    pub fn address(&self, default_port: u16) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or(default_port))
    }
}

/// Qdrant configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QdrantConfig {
    /// Full base URL; takes precedence over host/port
    pub url: Option<String>,
    /// Qdrant host
    pub host: String,
    /// Qdrant REST port
    pub port: u16,
    /// Optional API key sent as `api-key`
    pub api_key: Option<String>,
    /// Target collection name
    pub collection: String,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 6333,
            api_key: None,
            collection: "documents".to_string(),
        }
    }
}

impl QdrantConfig {
    /// Base URL for the REST API
    pub fn base_url(&self) -> String {
        match &self.url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key (required for the Answer and Document services)
    pub api_key: Option<String>,
    /// Generative Language API base URL
    pub base_url: String,
    /// Embedding model
    pub embedding_model: String,
    /// Generation model
    pub generation_model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            embedding_model: "embedding-001".to_string(),
            generation_model: "gemini-2.0-flash".to_string(),
        }
    }
}

impl GeminiConfig {
    /// API key or a configuration error naming the missing variable
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not configured".to_string()))
    }
}

/// Embedding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding dimensions (768 for embedding-001)
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self { dimensions: 768 }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Window size in characters
    pub chunk_size: usize,
    /// Overlap between neighbouring windows in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// How vector point identifiers are assigned
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PointIdPolicy {
    /// Fresh random UUID per chunk; re-ingesting duplicates points
    #[default]
    Random,
    /// UUID derived from the chunk content; re-ingesting overwrites points
    Content,
}

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    /// Transient directory for uploaded files
    pub upload_dir: PathBuf,
    /// Point id policy
    pub point_ids: PointIdPolicy,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            point_ids: PointIdPolicy::Random,
        }
    }
}

/// Chat UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatUiConfig {
    /// Document Service base URL
    pub document_service_url: String,
    /// Answer Service base URL
    pub answer_service_url: String,
    /// Chunks retrieved per chat turn
    pub context_limit: usize,
    /// Temperature sent with chat questions
    pub temperature: f32,
    /// Seconds a chat session may sit idle before it is dropped
    pub session_idle_secs: u64,
    /// Most chat sessions held at once
    pub max_sessions: usize,
}

impl Default for ChatUiConfig {
    fn default() -> Self {
        Self {
            document_service_url: "http://api-chat-bd:8000".to_string(),
            answer_service_url: "http://chat-api-llm:8000".to_string(),
            context_limit: 5,
            temperature: 0.7,
            session_idle_secs: 3600,
            max_sessions: 1000,
        }
    }
}
