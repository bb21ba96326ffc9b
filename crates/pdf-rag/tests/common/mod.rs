//! Shared stubs and request helpers for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pdf_rag::chat::{AnswerServiceClient, DocumentServiceClient};
use pdf_rag::config::RagConfig;
use pdf_rag::error::{Error, Result};
use pdf_rag::providers::{EmbeddingProvider, InMemoryVectorStore, LlmProvider};
use pdf_rag::types::{AskRequest, GenerationParams, SearchResult, StatusResponse};
use pdf_rag_test_util::embedding::hash_embedding;

pub const BOUNDARY: &str = "pdf-rag-test-boundary";

/// Bag-of-words embedder that counts calls
#[derive(Default)]
pub struct StubEmbedder {
    pub calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(hash_embedding(text, 768))
    }

    fn dimensions(&self) -> usize {
        768
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// LLM returning a fixed reply, or failing
pub struct StubLlm {
    pub reply: std::result::Result<String, String>,
    pub prompts: Mutex<Vec<(String, GenerationParams)>>,
}

impl StubLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String> {
        self.prompts.lock().push((prompt.to_string(), params));
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(Error::llm(message.clone())),
        }
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

/// Document Service stand-in for the chat UI
#[derive(Default)]
pub struct FakeDocuments {
    pub results: Vec<SearchResult>,
    pub fail_search: bool,
    pub uploads: Mutex<Vec<String>>,
    pub searches: Mutex<Vec<(String, usize)>>,
}

#[async_trait]
impl DocumentServiceClient for FakeDocuments {
    async fn create_collection(&self) -> Result<StatusResponse> {
        Ok(StatusResponse::success("Collection 'documents' created successfully!"))
    }

    async fn upload_pdf(&self, filename: &str, _data: Vec<u8>) -> Result<StatusResponse> {
        self.uploads.lock().push(filename.to_string());
        Ok(StatusResponse::success(
            "PDF processed successfully! 1 chunks inserted.",
        ))
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.searches.lock().push((query.to_string(), limit));
        if self.fail_search {
            return Err(Error::upstream("document service", 500, "qdrant down"));
        }
        Ok(self.results.iter().take(limit).cloned().collect())
    }
}

/// Answer Service stand-in for the chat UI
#[derive(Default)]
pub struct FakeAnswers {
    pub asked: Mutex<Vec<AskRequest>>,
}

#[async_trait]
impl AnswerServiceClient for FakeAnswers {
    async fn ask(&self, request: &AskRequest) -> Result<String> {
        self.asked.lock().push(request.clone());
        Ok("Revenue grew 12% quarter over quarter.".to_string())
    }
}

pub fn search_hit(text: &str, score: f32) -> SearchResult {
    SearchResult {
        id: uuid::Uuid::new_v4().to_string(),
        score,
        text: text.to_string(),
        metadata: Some(serde_json::json!({"source": "q3.pdf", "page": 1, "chunk_index": 0})),
    }
}

/// Default config with uploads staged in `dir`
pub fn test_config(dir: &std::path::Path) -> RagConfig {
    let mut config = RagConfig::default();
    config.ingestion.upload_dir = dir.to_path_buf();
    config
}

pub fn memory_store() -> Arc<InMemoryVectorStore> {
    Arc::new(InMemoryVectorStore::new())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap()
}

pub fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Multipart request with a single `file` field
pub fn post_file(uri: &str, filename: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), 10_000_000)
        .await
        .unwrap()
        .to_vec()
}

pub async fn json_body(response: Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = body_bytes(response).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn text_body(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = body_bytes(response).await;
    (status, String::from_utf8(bytes).unwrap())
}
