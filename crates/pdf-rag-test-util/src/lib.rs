//! Shared helpers for pdf-rag tests

pub mod embedding;
pub mod pdf;
