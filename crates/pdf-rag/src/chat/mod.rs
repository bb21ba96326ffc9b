//! Chat UI backend: service clients, sessions, and the RAG loop

pub mod client;
pub mod pipeline;
pub mod session;

pub use client::{AnswerServiceClient, DocumentServiceClient, HttpServiceClient};
pub use pipeline::{ChatOutcome, RagChat, APOLOGY_REPLY, NO_CONTEXT_REPLY};
pub use session::{ChatTurn, Role, SessionStore, Transcript};
