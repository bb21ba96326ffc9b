//! HTTP clients the chat UI uses to reach the two backend services

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{AskRequest, AskResponse, SearchQuery, SearchResult, StatusResponse};

/// Document Service operations used by the UI
#[async_trait]
pub trait DocumentServiceClient: Send + Sync {
    /// Ensure the collection exists
    async fn create_collection(&self) -> Result<StatusResponse>;

    /// Upload a PDF for ingestion
    async fn upload_pdf(&self, filename: &str, data: Vec<u8>) -> Result<StatusResponse>;

    /// Similarity search
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}

/// Answer Service operations used by the UI
#[async_trait]
pub trait AnswerServiceClient: Send + Sync {
    /// Ask a question, returning the answer text
    async fn ask(&self, request: &AskRequest) -> Result<String>;
}

/// reqwest-backed client for both services
#[derive(Clone)]
pub struct HttpServiceClient {
    client: reqwest::Client,
    document_url: String,
    answer_url: String,
}

impl HttpServiceClient {
    pub fn new(
        client: reqwest::Client,
        document_url: impl Into<String>,
        answer_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            document_url: document_url.into().trim_end_matches('/').to_string(),
            answer_url: answer_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn document(&self, path: &str) -> String {
        format!("{}{}", self.document_url, path)
    }

    fn answer(&self, path: &str) -> String {
        format!("{}{}", self.answer_url, path)
    }
}

/// Status endpoints answer `{status, message}` on failure too, so the body
/// is decoded whatever the HTTP status.
async fn status_body(service: &str, response: reqwest::Response) -> Result<StatusResponse> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|_| Error::upstream(service, status.as_u16(), body))
}

async fn json_body<T: DeserializeOwned>(service: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::upstream(service, status.as_u16(), error_message(&body)));
    }
    Ok(response.json().await?)
}

/// Pull `message` out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl DocumentServiceClient for HttpServiceClient {
    async fn create_collection(&self) -> Result<StatusResponse> {
        let response = self
            .client
            .post(self.document("/create-collection"))
            .send()
            .await?;
        status_body("document service", response).await
    }

    async fn upload_pdf(&self, filename: &str, data: Vec<u8>) -> Result<StatusResponse> {
        let part = Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.document("/upload-pdf"))
            .multipart(form)
            .send()
            .await?;
        status_body("document service", response).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let request = SearchQuery {
            query: query.to_string(),
            limit,
        };
        let response = self
            .client
            .post(self.document("/search"))
            .json(&request)
            .send()
            .await?;
        json_body("document service", response).await
    }
}

#[async_trait]
impl AnswerServiceClient for HttpServiceClient {
    async fn ask(&self, request: &AskRequest) -> Result<String> {
        let response = self
            .client
            .post(self.answer("/ask"))
            .json(request)
            .send()
            .await?;
        let body: AskResponse = json_body("answer service", response).await?;
        Ok(body.answer)
    }
}
