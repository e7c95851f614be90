mod mupdf_backend;

pub use mupdf_backend::MupdfBackend;

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("failed to open PDF: {0}")]
    Open(String),
    #[error("failed to extract text: {0}")]
    Extraction(String),
}

/// One extraction-reported rectangular text region on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    /// x0, y0, x1, y1 in page coordinates
    pub bbox: [f32; 4],
    pub text: String,
}

/// All text blocks of one page, in source order
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    pub blocks: Vec<TextBlock>,
}

/// Trait for PDF text-block extraction backends.
///
/// Implementors provide the low-level decoding step; the citation pipeline
/// only consumes pages of `(bbox, text)` blocks.
pub trait PdfBackend: Send + Sync {
    fn extract_blocks(&self, path: &Path) -> Result<Vec<Page>, PdfError>;
}
