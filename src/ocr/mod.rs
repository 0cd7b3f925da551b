pub mod ocr_space;
pub mod renderer;
pub mod tesseract;

pub use ocr_space::{OcrSpaceClient, OcrSpaceConfig};
pub use renderer::PageRenderer;
pub use tesseract::TesseractOcr;
