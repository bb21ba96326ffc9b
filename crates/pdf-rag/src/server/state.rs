//! Shared state for the three HTTP services

use handlebars::Handlebars;
use std::path::Path;
use std::sync::Arc;

use crate::chat::{AnswerServiceClient, DocumentServiceClient, HttpServiceClient, RagChat, SessionStore};
use crate::collection::CollectionManager;
use crate::config::{RagConfig, VectorBackend};
use crate::error::{Error, Result};
use crate::generation::AnswerService;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    EmbeddingProvider, GeminiEmbedder, GeminiLlm, InMemoryVectorStore, LlmProvider, QdrantStore,
    VectorStoreProvider,
};
use crate::retrieval::SearchService;
use crate::types::{CollectionSpec, Distance};

/// Name the chat page template is registered under
pub const CHAT_PAGE: &str = "chat_page";

const CHAT_PAGE_TEMPLATE: &str = include_str!("../../templates/chat.hbs");

/// Document Service state
#[derive(Clone)]
pub struct DocumentState {
    inner: Arc<DocumentStateInner>,
}

struct DocumentStateInner {
    config: RagConfig,
    collections: CollectionManager,
    ingest: IngestPipeline,
    search: SearchService,
}

impl DocumentState {
    /// Build providers from configuration
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!(
            "Initializing document service state (backend: {:?})...",
            config.backend
        );
        let client = config.http_client()?;

        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(GeminiEmbedder::new(client.clone(), &config.gemini, &config.embeddings)?);

        let store: Arc<dyn VectorStoreProvider> = match config.backend {
            VectorBackend::Qdrant => {
                tracing::info!("Using Qdrant at {}", config.qdrant.base_url());
                Arc::new(QdrantStore::new(client, &config.qdrant))
            }
            VectorBackend::Memory => {
                tracing::warn!("Using in-memory vector store; data is lost on exit");
                Arc::new(InMemoryVectorStore::new())
            }
        };

        Self::from_providers(config, embedder, store).await
    }

    /// Build state around existing providers
    pub async fn from_providers(
        config: RagConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Result<Self> {
        tokio::fs::create_dir_all(&config.ingestion.upload_dir).await?;
        tracing::info!(
            "Upload directory: {}",
            config.ingestion.upload_dir.display()
        );

        let collection = config.qdrant.collection.clone();
        let spec = CollectionSpec {
            dimensions: config.embeddings.dimensions,
            distance: Distance::Cosine,
        };

        let collections = CollectionManager::new(Arc::clone(&store), collection.clone(), spec);
        let ingest = IngestPipeline::new(
            Arc::clone(&embedder),
            Arc::clone(&store),
            collection.clone(),
            &config.chunking,
            config.ingestion.point_ids,
        );
        let search = SearchService::new(embedder, store, collection);

        Ok(Self {
            inner: Arc::new(DocumentStateInner {
                config,
                collections,
                ingest,
                search,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn collections(&self) -> &CollectionManager {
        &self.inner.collections
    }

    pub fn ingest(&self) -> &IngestPipeline {
        &self.inner.ingest
    }

    pub fn search(&self) -> &SearchService {
        &self.inner.search
    }

    /// Directory uploads are staged in
    pub fn upload_dir(&self) -> &Path {
        &self.inner.config.ingestion.upload_dir
    }
}

/// Answer Service state
#[derive(Clone)]
pub struct AnswerState {
    inner: Arc<AnswerStateInner>,
}

struct AnswerStateInner {
    config: RagConfig,
    answers: AnswerService,
}

impl AnswerState {
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!(
            "Initializing answer service state (model: {})...",
            config.gemini.generation_model
        );
        let client = config.http_client()?;
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiLlm::new(client.clone(), &config.gemini)?);
        let embedder: Arc<dyn EmbeddingProvider> =
            Arc::new(GeminiEmbedder::new(client, &config.gemini, &config.embeddings)?);
        Ok(Self::from_providers(config, llm, embedder))
    }

    pub fn from_providers(
        config: RagConfig,
        llm: Arc<dyn LlmProvider>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AnswerStateInner {
                config,
                answers: AnswerService::new(llm, embedder),
            }),
        }
    }

    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn answers(&self) -> &AnswerService {
        &self.inner.answers
    }
}

/// Chat UI state
#[derive(Clone)]
pub struct ChatUiState {
    inner: Arc<ChatUiStateInner>,
}

struct ChatUiStateInner {
    config: RagConfig,
    documents: Arc<dyn DocumentServiceClient>,
    chat: RagChat,
    sessions: SessionStore,
    templates: Handlebars<'static>,
}

impl ChatUiState {
    pub fn new(config: RagConfig) -> Result<Self> {
        tracing::info!(
            "Chat UI backends: documents at {}, answers at {}",
            config.chat_ui.document_service_url,
            config.chat_ui.answer_service_url
        );
        let client = Arc::new(HttpServiceClient::new(
            config.http_client()?,
            config.chat_ui.document_service_url.clone(),
            config.chat_ui.answer_service_url.clone(),
        ));
        Self::from_clients(config, client.clone(), client)
    }

    pub fn from_clients(
        config: RagConfig,
        documents: Arc<dyn DocumentServiceClient>,
        answers: Arc<dyn AnswerServiceClient>,
    ) -> Result<Self> {
        let mut templates = Handlebars::new();
        templates.set_strict_mode(false);
        templates
            .register_template_string(CHAT_PAGE, CHAT_PAGE_TEMPLATE)
            .map_err(|e| Error::Config(format!("Invalid page template: {}", e)))?;

        let chat = RagChat::new(
            Arc::clone(&documents),
            answers,
            config.chat_ui.context_limit,
            config.chat_ui.temperature,
        );

        let sessions = SessionStore::new(
            chrono::Duration::from_std(std::time::Duration::from_secs(
                config.chat_ui.session_idle_secs,
            ))
            .unwrap_or(chrono::Duration::MAX),
            config.chat_ui.max_sessions,
        );

        Ok(Self {
            inner: Arc::new(ChatUiStateInner {
                config,
                documents,
                chat,
                sessions,
                templates,
            }),
        })
    }

    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    pub fn documents(&self) -> &Arc<dyn DocumentServiceClient> {
        &self.inner.documents
    }

    pub fn chat(&self) -> &RagChat {
        &self.inner.chat
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    pub fn templates(&self) -> &Handlebars<'static> {
        &self.inner.templates
    }
}

