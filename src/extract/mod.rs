pub mod embedded;
pub mod pdf_reader;

pub use embedded::EmbeddedTextExtractor;
pub use pdf_reader::PdfReader;

use thiserror::Error;
use tracing::{info, warn};

use crate::core::model::TextSource;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("input is not a PDF (missing %PDF- header)")]
    NotPdf,

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("{backend} failed: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtractError {
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: message.into(),
        }
    }
}

/// Turns raw document bytes into plain text.
///
/// An empty string means the source holds no text; an error means the
/// collaborator itself failed.
pub trait TextExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Text obtained for one document, with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub text: String,
    pub source: TextSource,
    pub notes: Vec<String>,
}

/// Tries the embedded text layer first and only runs OCR when that yields
/// nothing. Collaborator errors are recorded as notes and degrade to empty
/// text.
pub struct FallbackExtractor {
    primary: Box<dyn TextExtractor>,
    ocr: Option<Box<dyn TextExtractor>>,
}

impl FallbackExtractor {
    pub fn new(primary: Box<dyn TextExtractor>, ocr: Option<Box<dyn TextExtractor>>) -> Self {
        Self { primary, ocr }
    }

    pub fn extract(&self, bytes: &[u8]) -> Extraction {
        let mut notes = Vec::new();

        if is_raster_image(bytes) {
            notes.push("Image upload has no text layer.".to_string());
        } else {
            match self.primary.extract(bytes) {
                Ok(text) if !text.trim().is_empty() => {
                    return Extraction {
                        text,
                        source: TextSource::Embedded,
                        notes,
                    };
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(extractor = self.primary.name(), %err, "text layer extraction failed");
                    notes.push(format!("Text layer extraction failed: {err}"));
                }
            }
        }

        let Some(ocr) = &self.ocr else {
            notes.push("No text layer detected and OCR is disabled.".to_string());
            return Extraction {
                text: String::new(),
                source: TextSource::None,
                notes,
            };
        };

        info!(backend = ocr.name(), "no text layer, applying OCR");
        notes.push(format!(
            "No text layer detected, applying OCR (via {})...",
            ocr.name()
        ));
        match ocr.extract(bytes) {
            Ok(text) if !text.trim().is_empty() => Extraction {
                text,
                source: TextSource::Ocr,
                notes,
            },
            Ok(_) => {
                notes.push("OCR returned no text.".to_string());
                Extraction {
                    text: String::new(),
                    source: TextSource::None,
                    notes,
                }
            }
            Err(err) => {
                warn!(backend = ocr.name(), %err, "OCR failed");
                notes.push(format!("OCR failed: {err}"));
                Extraction {
                    text: String::new(),
                    source: TextSource::None,
                    notes,
                }
            }
        }
    }
}

/// Recognised raster formats go straight to OCR.
pub fn is_raster_image(bytes: &[u8]) -> bool {
    image::guess_format(bytes).is_ok()
}
