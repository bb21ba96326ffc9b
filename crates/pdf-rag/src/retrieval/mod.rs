//! Retrieval over stored chunks

mod search;

pub use search::SearchService;
