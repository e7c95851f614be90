use std::path::Path;

use mupdf::{Document, TextPageFlags};

use crate::pdf::{Page, PdfBackend, PdfError, TextBlock};

/// MuPDF-based implementation of [`PdfBackend`].
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_blocks(&self, path: &Path) -> Result<Vec<Page>, PdfError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| PdfError::Open("invalid path encoding".into()))?;

        let document = Document::open(path_str).map_err(|e| PdfError::Open(e.to_string()))?;

        let mut pages = Vec::new();

        for (index, page_result) in document
            .pages()
            .map_err(|e| PdfError::Extraction(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| PdfError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| PdfError::Extraction(e.to_string()))?;

            let mut blocks = Vec::new();
            for block in text_page.blocks() {
                let bounds = block.bounds();

                let mut text = String::new();
                for line in block.lines() {
                    for c in line.chars() {
                        text.push(c.char().unwrap_or('\u{FFFD}'));
                    }
                    text.push('\n');
                }

                blocks.push(TextBlock {
                    bbox: [bounds.x0, bounds.y0, bounds.x1, bounds.y1],
                    text,
                });
            }

            pages.push(Page {
                number: index as u32 + 1,
                blocks,
            });
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_open_error() {
        let backend = MupdfBackend::new();
        let result = backend.extract_blocks(Path::new("/nonexistent/article.pdf"));
        assert!(matches!(result, Err(PdfError::Open(_))));
    }
}
