use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::core::materials::MaterialMatcher;
use crate::core::model::{BatchReport, DocumentReport, LoadFailure, ScaleSource, TextSource};
use crate::export::{Exporter, JsonExporter, MarkdownExporter, TextExporter};
use crate::extract::{EmbeddedTextExtractor, Extraction, FallbackExtractor, TextExtractor};
use crate::ocr::{OcrSpaceClient, OcrSpaceConfig, TesseractOcr};
use crate::parse::{BodyParser, HeaderParser};
use crate::reconcile::{ReconcileEngine, SimpleReconcileEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrBackend {
    None,
    OcrSpace,
    Tesseract,
}

/// Extensions stripped from an upload's name before header parsing.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "tif", "tiff"];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: Option<PathBuf>,
    pub ocr: OcrBackend,
    pub ocr_space: OcrSpaceConfig,
    pub dpi: u32,
    pub preview_chars: usize,
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            ocr: OcrBackend::OcrSpace,
            ocr_space: OcrSpaceConfig::default(),
            dpi: 200,
            preview_chars: 500,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn new(ocr: OcrBackend) -> Self {
        Self {
            ocr,
            ..Self::default()
        }
    }

    pub fn build_extractor(&self) -> Result<FallbackExtractor> {
        let ocr: Option<Box<dyn TextExtractor>> = match self.ocr {
            OcrBackend::None => None,
            OcrBackend::OcrSpace => Some(Box::new(
                OcrSpaceClient::new(self.ocr_space.clone())
                    .context("failed to build OCR.Space client")?,
            )),
            OcrBackend::Tesseract => Some(Box::new(
                TesseractOcr::new(self.dpi).with_lang(self.ocr_space.language.clone()),
            )),
        };
        Ok(FallbackExtractor::new(
            Box::new(EmbeddedTextExtractor::new()),
            ocr,
        ))
    }
}

/// One uploaded document. Its text is extracted at most once and reused.
#[derive(Debug)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
    extraction: OnceCell<Extraction>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            extraction: OnceCell::new(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }

    /// The file name without a known document or image extension. Other
    /// dots are part of the name ("0.6MM").
    pub fn header_text(&self) -> &str {
        let name = Path::new(&self.name)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.name);
        match name.rsplit_once('.') {
            Some((stem, ext))
                if DOCUMENT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known)) =>
            {
                stem
            }
            _ => name,
        }
    }

    pub fn extraction(&self, extractor: &FallbackExtractor) -> &Extraction {
        self.extraction
            .get_or_init(|| extractor.extract(&self.bytes))
    }
}

pub struct PrintChecker {
    extractor: FallbackExtractor,
    header: HeaderParser,
    body: BodyParser,
    engine: SimpleReconcileEngine,
    preview_chars: usize,
}

impl PrintChecker {
    pub fn new(extractor: FallbackExtractor) -> Self {
        let materials = MaterialMatcher::default();
        Self {
            extractor,
            header: HeaderParser::new(materials),
            body: BodyParser::new(materials),
            engine: SimpleReconcileEngine::new(),
            preview_chars: PipelineConfig::default().preview_chars,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new(config.build_extractor()?).with_preview_chars(config.preview_chars))
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn check(&self, document: &SourceDocument) -> DocumentReport {
        info!(name = %document.name, "checking document");
        let header = self.header.parse(document.header_text());
        let extraction = document.extraction(&self.extractor);
        let body = self.body.parse(&extraction.text);
        let reconciled = self.engine.reconcile(&header, &body);

        let mut notes = extraction.notes.clone();
        let scale = &reconciled.scale;
        if scale.source == ScaleSource::Inferred && scale.declared_percent.is_none() {
            notes.push(format!(
                "Scale not explicitly provided in document, scale assumed to be {}% based on size comparison.",
                scale.effective_percent as i64
            ));
        }
        if let (true, Some(declared)) = (scale.conflicting(), scale.declared_percent) {
            notes.push(format!(
                "Declared scale {declared}% conflicts with size comparison; using {}%.",
                scale.effective_percent as i64
            ));
        }
        if header.bleed_mm.is_none() {
            notes.push("No bleed information found in filename.".to_string());
        }

        let text_preview = match extraction.source {
            TextSource::None => None,
            _ => Some(extraction.text.chars().take(self.preview_chars).collect()),
        };

        DocumentReport {
            name: document.name.clone(),
            header,
            body,
            scale: reconciled.scale,
            normalized: reconciled.normalized,
            validation: reconciled.validation,
            text_source: extraction.source,
            notes,
            text_preview,
        }
    }

    /// Reports keep the input order regardless of `parallel`.
    pub fn check_batch(&self, documents: &[SourceDocument], parallel: bool) -> Vec<DocumentReport> {
        if parallel {
            documents.par_iter().map(|doc| self.check(doc)).collect()
        } else {
            documents.iter().map(|doc| self.check(doc)).collect()
        }
    }
}

/// Reads every input, checks the readable ones, and records the rest as
/// load failures.
pub fn build_report(config: &PipelineConfig, inputs: &[PathBuf]) -> Result<BatchReport> {
    let checker = PrintChecker::from_config(config)?;

    let mut documents = Vec::with_capacity(inputs.len());
    let mut failures = Vec::new();
    for input in inputs {
        match SourceDocument::from_path(input) {
            Ok(doc) => documents.push(doc),
            Err(err) => {
                warn!(input = %input.display(), "skipping unreadable input: {err:#}");
                failures.push(LoadFailure {
                    name: input.display().to_string(),
                    error: format!("{err:#}"),
                });
            }
        }
    }

    Ok(BatchReport {
        documents: checker.check_batch(&documents, config.parallel),
        failures,
    })
}

pub fn export_report(report: &BatchReport, output: &Path) -> Result<()> {
    let json_exporter = JsonExporter::new(output.to_path_buf());
    json_exporter.export(report)?;

    let markdown_exporter = MarkdownExporter::new(output.to_path_buf());
    markdown_exporter.export(report)?;

    let text_exporter = TextExporter::new(output.to_path_buf());
    text_exporter.export(report)?;

    Ok(())
}
