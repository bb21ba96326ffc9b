//! pdf-rag: PDF question answering over a vector database
//!
//! Three services share this crate:
//! - the Document Service ingests PDFs into a Qdrant collection and runs
//!   similarity search,
//! - the Answer Service forwards prompts and texts to Gemini,
//! - the Chat UI renders a page that drives both through a RAG loop.

pub mod chat;
pub mod collection;
pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod telemetry;
pub mod types;

pub use collection::{CollectionManager, CollectionStatus};
pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{Chunk, SearchResult, StatusResponse, VectorPoint};
