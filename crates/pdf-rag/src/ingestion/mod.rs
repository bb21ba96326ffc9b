//! Document ingestion pipeline for PDFs

mod chunker;
mod parser;
mod processor;

pub use chunker::TextChunker;
pub use parser::{PageText, ParsedPdf, PdfParser};
pub use processor::{IngestOutcome, IngestPipeline};
