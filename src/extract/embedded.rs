use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

use crate::extract::{ExtractError, TextExtractor};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Reads the embedded text layer of a PDF with `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTextExtractor;

impl EmbeddedTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for EmbeddedTextExtractor {
    fn name(&self) -> &'static str {
        "text layer"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if !bytes.starts_with(PDF_MAGIC) {
            return Err(ExtractError::NotPdf);
        }

        // pdf-extract panics on some malformed content streams; a panic here
        // must not take sibling documents in the batch down with it.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }));
        let text = match outcome {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => return Err(ExtractError::Pdf(err.to_string())),
            Err(_) => return Err(ExtractError::Pdf("parser panicked".to_string())),
        };
        debug!(chars = text.chars().count(), "extracted text layer");
        Ok(text)
    }
}
