//! Document Service endpoints

use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::collection::CollectionStatus;
use crate::error::{Error, Result};
use crate::ingestion::IngestOutcome;
use crate::server::state::DocumentState;
use crate::types::{DocumentHealth, SearchQuery, SearchResult, StatusResponse};

use super::status_body;

/// True if the uploaded name carries a `.pdf` extension
pub(crate) fn is_pdf_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

/// POST /create-collection
pub async fn create_collection(State(state): State<DocumentState>) -> Response {
    let collections = state.collections();
    let outcome = collections.ensure_collection().await;
    let body = outcome.to_response(collections.name());

    let code = match outcome {
        CollectionStatus::Error(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };
    status_body(code, body)
}

/// POST /upload-pdf - multipart field `file`
pub async fn upload_pdf(
    State(state): State<DocumentState>,
    mut multipart: Multipart,
) -> Result<Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::validation("Uploaded file has no filename"))?;

        if !is_pdf_filename(&filename) {
            tracing::warn!("Rejected non-PDF upload: {}", filename);
            return Err(Error::UnsupportedFileType(format!(
                "{} (only PDF files are allowed)",
                filename
            )));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;
        tracing::info!("Received {} ({} bytes)", filename, data.len());

        // Removed when `staged` drops, whatever the outcome
        let staged = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(".pdf")
            .tempfile_in(state.upload_dir())?;
        tokio::fs::write(staged.path(), &data).await?;

        let outcome = state.ingest().process_pdf(staged.path(), &filename).await;
        let response = match &outcome {
            IngestOutcome::Inserted(_) => {
                status_body(StatusCode::OK, StatusResponse::success(outcome.message()))
            }
            IngestOutcome::Failed(message) => status_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusResponse::error(format!("Error processing PDF: {}", message)),
            ),
        };
        return Ok(response);
    }

    Err(Error::validation("Missing multipart field `file`"))
}

/// POST /search
pub async fn search(
    State(state): State<DocumentState>,
    payload: std::result::Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<Vec<SearchResult>>> {
    let Json(request) = payload?;
    if request.limit == 0 {
        return Err(Error::validation("limit must be at least 1"));
    }
    let results = state.search().search(&request.query, request.limit).await?;
    Ok(Json(results))
}

/// GET /health
pub async fn health(State(state): State<DocumentState>) -> impl IntoResponse {
    let health: DocumentHealth = state.collections().health().await;
    Json(health)
}
