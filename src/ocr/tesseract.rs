use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use crate::extract::{is_raster_image, ExtractError, PdfReader, TextExtractor};
use crate::ocr::renderer::PageRenderer;

const BACKEND: &str = "tesseract";

/// Local OCR: each PDF page is rendered once and passed to the `tesseract`
/// CLI. Raster uploads are recognised directly.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    binary: PathBuf,
    lang: String,
    dpi: u32,
}

impl TesseractOcr {
    pub fn new(dpi: u32) -> Self {
        Self {
            binary: PathBuf::from("tesseract"),
            lang: "eng".to_string(),
            dpi,
        }
    }

    pub fn with_binary(mut self, binary: PathBuf) -> Self {
        self.binary = binary;
        self
    }

    pub fn with_lang(mut self, lang: String) -> Self {
        self.lang = lang;
        self
    }

    fn recognise(&self, image_path: &Path) -> Result<String, ExtractError> {
        let output = Command::new(&self.binary)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|err| {
                ExtractError::backend(BACKEND, format!("failed to invoke tesseract: {err}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::backend(BACKEND, stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn recognise_pdf(&self, pdf_path: &Path, work_dir: &Path) -> Result<String, ExtractError> {
        let page_count = PdfReader::new(pdf_path.to_path_buf())
            .and_then(|reader| reader.page_count())
            .map_err(|err| ExtractError::backend(BACKEND, format!("{err:#}")))?;
        let renderer = PageRenderer::new(work_dir.join("pages"), self.dpi);

        let mut pages = Vec::with_capacity(page_count);
        let mut last_error = None;
        for page_idx in 0..page_count {
            let page = renderer
                .render_page(pdf_path, page_idx)
                .map_err(|err| ExtractError::backend(BACKEND, format!("{err:#}")))
                .and_then(|image_path| {
                    debug!(page_idx, path = %image_path.display(), "rendered page");
                    self.recognise(&image_path)
                });
            match page {
                Ok(text) => pages.push(text),
                Err(err) => {
                    warn!(page_idx, %err, "OCR failed for page");
                    last_error = Some(err);
                }
            }
        }

        match (pages.is_empty(), last_error) {
            (true, Some(err)) => Err(err),
            _ => Ok(pages.join("\n")),
        }
    }
}

impl TextExtractor for TesseractOcr {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let work_dir = tempfile::tempdir()?;
        if is_raster_image(bytes) {
            let image_path = work_dir.path().join("upload");
            fs::write(&image_path, bytes)?;
            return self.recognise(&image_path);
        }

        let pdf_path = work_dir.path().join("upload.pdf");
        fs::write(&pdf_path, bytes)?;
        self.recognise_pdf(&pdf_path, work_dir.path())
    }
}
