//! Chunk and vector point types

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::PointIdPolicy;

/// A contiguous window of extracted PDF text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Window text (never empty or whitespace-only)
    pub text: String,
    /// Source name recorded in the payload
    pub source: String,
    /// Page the window starts on (1-indexed)
    pub page: u32,
    /// Ordinal position within the document
    pub chunk_index: u32,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(text: String, source: impl Into<String>, page: u32, chunk_index: u32) -> Self {
        Self {
            text,
            source: source.into(),
            page,
            chunk_index,
        }
    }

    /// Identifier for the point this chunk will become
    pub fn point_id(&self, policy: PointIdPolicy) -> Uuid {
        match policy {
            PointIdPolicy::Random => Uuid::new_v4(),
            PointIdPolicy::Content => {
                let mut hasher = Sha256::new();
                hasher.update(self.source.as_bytes());
                hasher.update(b"|");
                hasher.update(self.chunk_index.to_le_bytes());
                hasher.update(b"|");
                hasher.update(self.text.as_bytes());
                let digest = hasher.finalize();

                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(&digest[..16]);
                uuid::Builder::from_random_bytes(bytes).into_uuid()
            }
        }
    }

    /// Payload stored alongside the vector
    pub fn payload(&self) -> ChunkPayload {
        ChunkPayload {
            text: self.text.clone(),
            page: self.page,
            source: self.source.clone(),
            chunk_index: self.chunk_index,
        }
    }
}

/// Payload persisted with each point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChunkPayload {
    /// Chunk text
    pub text: String,
    /// Page number
    pub page: u32,
    /// Source name
    pub source: String,
    /// Chunk index within the document
    pub chunk_index: u32,
}

/// An (id, vector, payload) triple sent to the vector store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorPoint {
    /// Point identifier
    pub id: Uuid,
    /// Embedding vector
    pub vector: Vec<f32>,
    /// Payload
    pub payload: ChunkPayload,
}

/// Vector store collection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Vector dimensionality
    pub dimensions: usize,
    /// Distance metric
    pub distance: Distance,
}

impl Default for CollectionSpec {
    fn default() -> Self {
        Self {
            dimensions: 768,
            distance: Distance::Cosine,
        }
    }
}

/// Similarity metric for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    Cosine,
    Dot,
    Euclid,
}
