//! PDF ingestion pipeline: extract → chunk → embed → upsert

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ChunkingConfig, PointIdPolicy};
use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, VectorStoreProvider};
use crate::types::VectorPoint;

use super::chunker::TextChunker;
use super::parser::PdfParser;

/// Result of one ingestion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// All chunks were embedded and upserted
    Inserted(usize),
    /// The run failed; nothing from this run was upserted
    Failed(String),
}

impl IngestOutcome {
    /// User-facing message for the outcome
    pub fn message(&self) -> String {
        match self {
            IngestOutcome::Inserted(count) => {
                format!("PDF processed successfully! {} chunks inserted.", count)
            }
            IngestOutcome::Failed(message) => message.clone(),
        }
    }
}

/// Turns PDF files into vector points in one collection
pub struct IngestPipeline {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    collection: String,
    chunker: TextChunker,
    point_ids: PointIdPolicy,
}

impl IngestPipeline {
    /// Create a new pipeline
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        collection: impl Into<String>,
        chunking: &ChunkingConfig,
        point_ids: PointIdPolicy,
    ) -> Self {
        Self {
            embedder,
            store,
            collection: collection.into(),
            chunker: TextChunker::new(chunking.chunk_size, chunking.chunk_overlap),
            point_ids,
        }
    }

    /// Process a PDF on disk, converting every failure into `IngestOutcome::Failed`
    ///
    /// `source` is the name recorded in each point's payload.
    pub async fn process_pdf(&self, path: &Path, source: &str) -> IngestOutcome {
        tracing::info!("Processing PDF {} ({})", source, path.display());
        let start = Instant::now();

        match self.run(path, source).await {
            Ok(count) => {
                tracing::info!(
                    "Ingested {} chunks from {} in {:.1}s",
                    count,
                    source,
                    start.elapsed().as_secs_f64()
                );
                IngestOutcome::Inserted(count)
            }
            Err(e) => {
                tracing::error!("Failed to process {}: {}", source, e);
                IngestOutcome::Failed(e.to_string())
            }
        }
    }

    async fn run(&self, path: &Path, source: &str) -> Result<usize> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let data = tokio::fs::read(path).await?;
        let filename = source.to_string();
        let parsed = tokio::task::spawn_blocking(move || PdfParser::parse(&filename, &data))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))??;
        tracing::info!("PDF loaded with {} pages", parsed.total_pages);

        let chunks = self.chunker.chunk_pages(source, &parsed.pages);
        tracing::info!("Text split into {} chunks", chunks.len());

        let expected = self.embedder.dimensions();
        let mut points = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            tracing::debug!("Embedding chunk {}/{}", i + 1, chunks.len());
            let vector = self.embedder.embed(&chunk.text).await?;
            if vector.len() != expected {
                return Err(Error::embedding(format!(
                    "chunk {} embedded to {} dimensions, expected {}",
                    i,
                    vector.len(),
                    expected
                )));
            }
            points.push(VectorPoint {
                id: chunk.point_id(self.point_ids),
                vector,
                payload: chunk.payload(),
            });
        }

        let count = points.len();
        if count > 0 {
            tracing::info!("Upserting {} points into {}", count, self.collection);
            self.store.upsert(&self.collection, points).await?;
        }
        Ok(count)
    }
}
