//! Similarity search over the document collection

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, ScoredPoint, VectorStoreProvider};
use crate::types::SearchResult;

/// Payload keys surfaced as result metadata
const METADATA_KEYS: [&str; 3] = ["page", "source", "chunk_index"];

/// Embeds queries and searches the collection
pub struct SearchService {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    collection: String,
}

impl SearchService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            embedder,
            store,
            collection: collection.into(),
        }
    }

    /// Most similar chunks to `query`, highest score first
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let query_vector = self.embedder.embed(query).await?;
        let hits = self
            .store
            .search(&self.collection, &query_vector, limit)
            .await?;

        tracing::debug!("Search for {:?} returned {} hits", query, hits.len());
        hits.into_iter().map(to_result).collect()
    }
}

fn to_result(hit: ScoredPoint) -> Result<SearchResult> {
    let text = hit
        .payload
        .get("text")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::vector_db(format!("Point {} has no text payload", hit.id)))?
        .to_string();

    let metadata: Map<String, Value> = METADATA_KEYS
        .iter()
        .filter_map(|key| hit.payload.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();

    Ok(SearchResult {
        id: hit.id,
        score: hit.score,
        text,
        metadata: (!metadata.is_empty()).then_some(Value::Object(metadata)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(payload: Value) -> ScoredPoint {
        ScoredPoint {
            id: "p1".to_string(),
            score: 0.91,
            payload: payload.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_metadata_from_payload() {
        let result = to_result(hit(json!({
            "text": "revenue grew",
            "page": 2,
            "source": "q3.pdf",
            "chunk_index": 4
        })))
        .unwrap();

        assert_eq!(result.text, "revenue grew");
        assert_eq!(
            result.metadata,
            Some(json!({"page": 2, "source": "q3.pdf", "chunk_index": 4}))
        );
    }

    #[test]
    fn test_text_only_payload_has_no_metadata() {
        let result = to_result(hit(json!({"text": "plain"}))).unwrap();
        assert_eq!(result.metadata, None);
    }

    #[test]
    fn test_missing_text_is_an_error() {
        assert!(to_result(hit(json!({"page": 1}))).is_err());
    }
}
