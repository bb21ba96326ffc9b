//! Vector store provider trait for collections, upserts and similarity search

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{CollectionSpec, VectorPoint};

/// A point returned by a similarity query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPoint {
    /// Point identifier rendered as a string (UUIDs and integers both occur)
    pub id: String,
    /// Similarity score (higher is more similar)
    pub score: f32,
    /// Raw payload
    pub payload: Map<String, Value>,
}

/// Summary of an existing collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    pub name: String,
    /// Configured vector size, when reported
    pub dimensions: Option<usize>,
    /// Stored point count, when reported
    pub points_count: Option<u64>,
}

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `QdrantStore`: Qdrant REST API
/// - `InMemoryVectorStore`: process-local brute-force store
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Names of all existing collections
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Create a collection with fixed dimensionality and metric
    async fn create_collection(&self, name: &str, spec: CollectionSpec) -> Result<()>;

    /// Fetch a collection; fails if it does not exist or the store is unreachable
    async fn get_collection(&self, name: &str) -> Result<CollectionInfo>;

    /// Insert or replace points in one batch
    async fn upsert(&self, collection: &str, points: Vec<VectorPoint>) -> Result<()>;

    /// Nearest neighbours of `vector`, highest score first, at most `limit`
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
