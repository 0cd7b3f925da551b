use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Page metadata for a PDF on disk, read through poppler's `pdfinfo`.
#[derive(Debug, Clone)]
pub struct PdfReader {
    path: PathBuf,
}

impl PdfReader {
    pub fn new(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("PDF not found: {}", path.display());
        }
        Ok(Self { path })
    }

    pub fn page_count(&self) -> Result<usize> {
        get_page_count(&self.path)
    }
}

fn get_page_count(pdf_path: &Path) -> Result<usize> {
    let output = Command::new("pdfinfo")
        .arg(pdf_path)
        .output()
        .with_context(|| format!("failed to invoke pdfinfo on {}", pdf_path.display()))?;

    if !output.status.success() {
        anyhow::bail!("pdfinfo failed with status: {}", output.status);
    }

    parse_page_count(&String::from_utf8_lossy(&output.stdout)).with_context(|| {
        format!(
            "pdfinfo output did not contain a usable 'Pages:' line for {}",
            pdf_path.display()
        )
    })
}

fn parse_page_count(stdout: &str) -> Result<usize> {
    for line in stdout.lines() {
        if let Some(rest) = line.strip_prefix("Pages:") {
            let num_str = rest.trim();
            let pages: usize = num_str.parse().with_context(|| {
                format!("failed to parse page count from 'Pages:' line: {num_str}")
            })?;
            return Ok(pages);
        }
    }
    anyhow::bail!("no 'Pages:' line")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_pages_line() {
        let stdout = "Producer:       Acrobat\nPages:          3\nPage size:      595 x 842 pts (A4)\n";
        assert_eq!(parse_page_count(stdout).unwrap(), 3);
    }

    #[test]
    fn missing_file_is_rejected_up_front() {
        let err = PdfReader::new(PathBuf::from("/nonexistent/artwork.pdf")).unwrap_err();
        assert!(err.to_string().contains("PDF not found"));
    }

    #[test]
    fn missing_pages_line_is_an_error() {
        assert!(parse_page_count("Producer: x\n").is_err());
        assert!(parse_page_count("Pages: many\n").is_err());
    }
}
