//! Fixed-window text chunking with page tracking

use unicode_segmentation::UnicodeSegmentation;

use super::parser::PageText;
use crate::types::Chunk;

/// Splits page text into overlapping fixed-size windows
///
/// Sizes count grapheme clusters. Window boundaries ignore words and
/// sentences, so a chunk may end mid-word.
pub struct TextChunker {
    /// Window size in characters
    chunk_size: usize,
    /// Characters shared between neighbouring windows
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker; `overlap` must be smaller than `chunk_size`
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        debug_assert!(overlap < chunk_size);
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Chunk the concatenated text of `pages`
    ///
    /// Pages are joined with a newline. Each chunk records the page its
    /// window starts on. Whitespace-only windows are dropped.
    pub fn chunk_pages(&self, source: &str, pages: &[PageText]) -> Vec<Chunk> {
        let mut graphemes: Vec<&str> = Vec::new();
        // (first grapheme index, page number)
        let mut page_starts: Vec<(usize, u32)> = Vec::new();

        for page in pages.iter().filter(|p| !p.content.is_empty()) {
            if !graphemes.is_empty() {
                graphemes.push("\n");
            }
            page_starts.push((graphemes.len(), page.page_number));
            graphemes.extend(page.content.graphemes(true));
        }

        let total = graphemes.len();
        let step = self.chunk_size - self.overlap;
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < total {
            let end = (start + self.chunk_size).min(total);
            let text = graphemes[start..end].concat();

            if !text.trim().is_empty() {
                let page = Self::page_at(&page_starts, start);
                chunks.push(Chunk::new(text, source, page, chunks.len() as u32));
            }

            if end == total {
                break;
            }
            start += step;
        }

        chunks
    }

    fn page_at(page_starts: &[(usize, u32)], index: usize) -> u32 {
        page_starts
            .iter()
            .take_while(|(start, _)| *start <= index)
            .last()
            .map_or(1, |(_, page)| *page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, content: &str) -> PageText {
        PageText {
            page_number: number,
            content: content.to_string(),
        }
    }

    fn expected_count(n: usize, size: usize, overlap: usize) -> usize {
        if n <= size {
            1
        } else {
            1 + (n - size).div_ceil(size - overlap)
        }
    }

    #[test]
    fn test_chunk_counts_follow_window_formula() {
        let chunker = TextChunker::new(1000, 200);
        for n in [1usize, 999, 1000, 1001, 1800, 1801, 5000, 12_345] {
            let text: String = "abcdefghij".chars().cycle().take(n).collect();
            let chunks = chunker.chunk_pages("doc.pdf", &[page(1, &text)]);
            assert_eq!(chunks.len(), expected_count(n, 1000, 200), "n = {n}");
            assert!(chunks.iter().all(|c| c.text.chars().count() <= 1000));
        }
    }

    #[test]
    fn test_neighbours_overlap() {
        let text: String = (0..2500).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = TextChunker::new(1000, 200).chunk_pages("doc.pdf", &[page(1, &text)]);

        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().skip(800).collect();
            let head: String = pair[1].text.chars().take(200).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_indices_and_source() {
        let text = "x".repeat(3000);
        let chunks = TextChunker::new(1000, 200).chunk_pages("uploads/a.pdf", &[page(1, &text)]);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.chunk_index, i as u32);
            assert_eq!(chunk.source, "uploads/a.pdf");
        }
    }

    #[test]
    fn test_page_numbers_follow_window_start() {
        let pages = [page(1, &"a".repeat(900)), page(2, &"b".repeat(900))];
        let chunks = TextChunker::new(1000, 200).chunk_pages("doc.pdf", &pages);

        // 1801 characters: windows start at 0, 800 and 1600
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].page, 1);
        assert_eq!(chunks[1].page, 1);
        assert_eq!(chunks[2].page, 2);
    }

    #[test]
    fn test_empty_and_blank_pages_produce_no_chunks() {
        let chunker = TextChunker::new(1000, 200);
        assert!(chunker.chunk_pages("doc.pdf", &[]).is_empty());
        assert!(chunker
            .chunk_pages("doc.pdf", &[page(1, ""), page(2, "   ")])
            .is_empty());
    }

    #[test]
    fn test_multibyte_text_is_split_on_characters() {
        let text = "é".repeat(1500);
        let chunks = TextChunker::new(1000, 200).chunk_pages("doc.pdf", &[page(1, &text)]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text.chars().count(), 1000);
        assert_eq!(chunks[1].text.chars().count(), 700);
    }
}
