//! Document Service routes exercised through the router with stub providers

mod common;

use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use common::*;
use pdf_rag::providers::InMemoryVectorStore;
use pdf_rag::server::{document_router, state::DocumentState};
use pdf_rag_test_util::pdf::sample_pdf;

struct Harness {
    app: Router,
    store: Arc<InMemoryVectorStore>,
    embedder: Arc<StubEmbedder>,
    uploads: tempfile::TempDir,
}

async fn harness() -> Harness {
    let uploads = tempfile::tempdir().unwrap();
    let store = memory_store();
    let embedder = Arc::new(StubEmbedder::default());
    let state = DocumentState::from_providers(
        test_config(uploads.path()),
        embedder.clone(),
        store.clone(),
    )
    .await
    .unwrap();

    Harness {
        app: document_router(state),
        store,
        embedder,
        uploads,
    }
}

impl Harness {
    async fn call(&self, request: axum::http::Request<axum::body::Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    fn staged_files(&self) -> usize {
        std::fs::read_dir(self.uploads.path()).unwrap().count()
    }
}

#[tokio::test]
async fn test_create_collection_is_idempotent() {
    let h = harness().await;

    let (status, body) = json_body(h.call(post_empty("/create-collection")).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");

    let (status, body) = json_body(h.call(post_empty("/create-collection")).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "info");
    assert_eq!(body["message"], "Collection 'documents' already exists.");
}

#[tokio::test]
async fn test_health_reports_collection_state() {
    let h = harness().await;

    let (_, body) = json_body(h.call(get("/health")).await).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["qdrant"], "disconnected");

    h.call(post_empty("/create-collection")).await;
    let (status, body) = json_body(h.call(get("/health")).await).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "healthy", "qdrant": "connected"}));
}

#[tokio::test]
async fn test_non_pdf_upload_is_rejected_without_provider_calls() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let request = post_file("/upload-pdf", "notes.txt", "text/plain", b"plain text");
    let (status, body) = json_body(h.call(request).await).await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_type"], "unsupported_type");
    assert_eq!(h.embedder.calls(), 0);
    assert_eq!(h.store.point_count("documents"), 0);
    assert_eq!(h.staged_files(), 0);
}

#[tokio::test]
async fn test_upload_then_search_finds_relevant_chunk() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let report = sample_pdf(&["Quarterly revenue grew 12% on strong subscription sales"]);
    let (status, body) = json_body(
        h.call(post_file("/upload-pdf", "q3.pdf", "application/pdf", &report))
            .await,
    )
    .await;
    assert_eq!(status, 200, "{body}");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "PDF processed successfully! 1 chunks inserted.");

    let menu = sample_pdf(&["The cafeteria serves soup on Fridays"]);
    h.call(post_file("/upload-pdf", "menu.pdf", "application/pdf", &menu))
        .await;

    assert_eq!(h.store.point_count("documents"), 2);
    assert!(h.store.points("documents").iter().all(|p| p.vector.len() == 768));
    // Staged uploads are removed once processed
    assert_eq!(h.staged_files(), 0);

    let (status, results) = json_body(
        h.call(post_json("/search", json!({"query": "revenue growth"})))
            .await,
    )
    .await;
    assert_eq!(status, 200);
    let results = results.as_array().unwrap();
    assert!(!results.is_empty() && results.len() <= 5);
    assert!(results[0]["text"]
        .as_str()
        .unwrap()
        .contains("revenue grew 12%"));
    assert_eq!(results[0]["metadata"]["source"], "q3.pdf");
    assert_eq!(results[0]["metadata"]["page"], 1);
}

#[tokio::test]
async fn test_search_respects_limit() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;
    for name in ["a.pdf", "b.pdf", "c.pdf"] {
        let pdf = sample_pdf(&["revenue figures for the quarter"]);
        h.call(post_file("/upload-pdf", name, "application/pdf", &pdf))
            .await;
    }

    let (_, results) = json_body(
        h.call(post_json("/search", json!({"query": "revenue", "limit": 2})))
            .await,
    )
    .await;
    assert_eq!(results.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_search_rejects_zero_limit() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let (status, body) = json_body(
        h.call(post_json("/search", json!({"query": "revenue", "limit": 0})))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error_type"], "validation_error");
    assert_eq!(h.embedder.calls(), 0);
}

#[tokio::test]
async fn test_search_without_query_is_validation_error() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let (status, body) = json_body(h.call(post_json("/search", json!({"limit": 3}))).await).await;
    assert_eq!(status, 400);
    assert_eq!(body["error_type"], "validation_error");
}

#[tokio::test]
async fn test_search_empty_collection_returns_empty_list() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let (status, body) = json_body(
        h.call(post_json("/search", json!({"query": "anything", "limit": 5})))
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_search_without_collection_is_server_error() {
    let h = harness().await;

    let (status, body) = json_body(
        h.call(post_json("/search", json!({"query": "anything"})))
            .await,
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(body["error_type"], "vector_db_error");
}

#[tokio::test]
async fn test_corrupt_pdf_reports_processing_error() {
    let h = harness().await;
    h.call(post_empty("/create-collection")).await;

    let request = post_file("/upload-pdf", "broken.pdf", "application/pdf", b"%PDF-1.4 nope");
    let (status, body) = json_body(h.call(request).await).await;

    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Error processing PDF"));
    assert_eq!(h.embedder.calls(), 0);
    assert_eq!(h.staged_files(), 0);
}
