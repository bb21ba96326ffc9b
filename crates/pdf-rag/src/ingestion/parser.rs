//! PDF text extraction with page tracking

use crate::error::{Error, Result};

/// Text extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Cleaned text content
    pub content: String,
}

/// Extracted document: ordered pages
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    /// Pages in document order; pages without text are kept with empty content
    pub pages: Vec<PageText>,
    /// Page count reported by the document
    pub total_pages: u32,
}

impl ParsedPdf {
    /// True if no page carries any text
    pub fn is_empty(&self) -> bool {
        self.pages.iter().all(|p| p.content.trim().is_empty())
    }
}

/// Replace ligatures and typographic punctuation that embeddings handle poorly
fn cleanup_pdf_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\0' => {}
            '\u{2010}' | '\u{2011}' | '\u{2013}' => result.push('-'),
            '\u{2014}' => result.push_str("--"),
            '\u{2018}' | '\u{2019}' => result.push('\''),
            '\u{201C}' | '\u{201D}' => result.push('"'),
            '\u{2022}' => result.push_str("* "),
            '\u{2026}' => result.push_str("..."),
            '\u{00A0}' => result.push(' '),
            '\u{FB00}' => result.push_str("ff"),
            '\u{FB01}' => result.push_str("fi"),
            '\u{FB02}' => result.push_str("fl"),
            '\u{FB03}' => result.push_str("ffi"),
            '\u{FB04}' => result.push_str("ffl"),
            other => result.push(other),
        }
    }

    result
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// PDF parser
pub struct PdfParser;

impl PdfParser {
    /// Parse PDF bytes into per-page text
    ///
    /// Per-page text comes from `lopdf`. If that yields nothing, the whole
    /// document is extracted with `pdf-extract` and returned as a single page.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedPdf> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let total_pages = page_numbers.len() as u32;

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let content = match doc.extract_text(&[page_number]) {
                Ok(text) => cleanup_pdf_text(&text),
                Err(e) => {
                    tracing::debug!("Could not extract text for page {}: {}", page_number, e);
                    String::new()
                }
            };
            pages.push(PageText {
                page_number,
                content,
            });
        }

        let parsed = ParsedPdf { pages, total_pages };
        if !parsed.is_empty() {
            return Ok(parsed);
        }

        tracing::warn!("Per-page extraction found no text in {}, trying pdf-extract", filename);
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("pdf-extract failed: {}", e)))?;
        let content = cleanup_pdf_text(&text);

        if content.is_empty() {
            return Err(Error::file_parse(
                filename,
                "PDF appears to be image-based or has no extractable text",
            ));
        }

        Ok(ParsedPdf {
            pages: vec![PageText {
                page_number: 1,
                content,
            }],
            total_pages: total_pages.max(1),
        })
    }
}
