//! Core types shared by the services

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, ChunkPayload, CollectionSpec, Distance, VectorPoint};
pub use query::{
    AskRequest, EmbeddingRequest, GenerationParams, SearchQuery, DEFAULT_SEARCH_LIMIT,
    DEFAULT_TEMPERATURE,
};
pub use response::{
    AnswerHealth, AskResponse, DocumentHealth, EmbeddingResponse, SearchResult, StatusKind,
    StatusResponse,
};
