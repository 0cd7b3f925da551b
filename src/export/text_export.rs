use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::{BatchReport, DocumentReport, ScaleSource, Severity, NOT_FOUND};
use crate::export::Exporter;

/// Plain-text reports: `report.txt` for the batch plus `doc_NNN.txt` per
/// document, which also carries the extracted text preview.
#[derive(Debug, Clone)]
pub struct TextExporter {
    out_dir: PathBuf,
}

impl TextExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for TextExporter {
    fn export(&self, report: &BatchReport) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;

        fs::write(self.out_dir.join("report.txt"), render_batch(report))?;

        for (idx, doc) in report.documents.iter().enumerate() {
            let mut text = render_document(doc);
            if let Some(preview) = &doc.text_preview {
                text.push_str("\n--- Extracted text (preview) ---\n");
                text.push_str(preview);
                text.push('\n');
            }
            fs::write(self.out_dir.join(format!("doc_{:03}.txt", idx + 1)), text)?;
        }

        Ok(())
    }
}

pub fn render_batch(report: &BatchReport) -> String {
    let mut out = String::new();
    for doc in &report.documents {
        out.push_str(&render_document(doc));
        out.push('\n');
    }
    for failure in &report.failures {
        let _ = writeln!(out, "=== {} ===\n[✗] Could not read file: {}\n", failure.name, failure.error);
    }
    out
}

pub fn render_document(doc: &DocumentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Checking: {} ===", doc.name);

    let filename_size = doc
        .header
        .size
        .map(|size| size.to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let document_size = doc
        .body
        .size
        .map(|size| size.to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let normalized_size = doc
        .normalized
        .size
        .map(|size| size.rounded().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let bleed = doc
        .normalized
        .bleed_mm
        .map(|bleed| format!("{bleed:.1}mm"))
        .unwrap_or_else(|| NOT_FOUND.to_string());

    let _ = writeln!(out, "Filename Size: {filename_size}");
    let _ = writeln!(out, "Document Size: {document_size}");
    let _ = writeln!(
        out,
        "Detected Scale: {}% ({})",
        doc.scale.effective_percent as i64,
        scale_source_label(doc.scale.source)
    );
    let _ = writeln!(out, "Normalized Document Size: {normalized_size}");
    let _ = writeln!(out, "Bleed: {bleed} (filename: {})", doc.header.bleed_label());
    let _ = writeln!(out, "Material: {}", doc.body.material_label());
    let _ = writeln!(out, "Colourspace: {}", doc.body.colourspace_label());

    if !doc.notes.is_empty() {
        out.push('\n');
        for note in &doc.notes {
            let _ = writeln!(out, "[i] {note}");
        }
    }

    out.push_str("\nValidation Results\n");
    for (_, check) in doc.validation.checks() {
        let _ = writeln!(out, "{} {}", severity_marker(check.severity), check.message);
        if let Some(remediation) = &check.remediation {
            for line in remediation.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
    out
}

pub(crate) fn severity_marker(severity: Severity) -> &'static str {
    match severity {
        Severity::Ok => "[✓]",
        Severity::Info => "[i]",
        Severity::Warning => "[!]",
        Severity::Error => "[✗]",
    }
}

pub(crate) fn scale_source_label(source: ScaleSource) -> &'static str {
    match source {
        ScaleSource::Declared => "declared",
        ScaleSource::Inferred => "inferred",
        ScaleSource::Default => "default",
    }
}
