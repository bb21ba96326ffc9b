//! Provider abstractions for embeddings, LLM and vector storage
//!
//! Services hold these as trait objects so Qdrant and Gemini can be swapped
//! for in-process implementations.

pub mod embedding;
pub mod gemini;
pub mod llm;
pub mod local;
pub mod qdrant;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use gemini::{GeminiEmbedder, GeminiLlm};
pub use llm::LlmProvider;
pub use local::InMemoryVectorStore;
pub use qdrant::QdrantStore;
pub use vector_store::{CollectionInfo, ScoredPoint, VectorStoreProvider};
