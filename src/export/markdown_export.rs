use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::Result;

use crate::core::model::{BatchReport, DocumentReport, NOT_FOUND};
use crate::export::text_export::{scale_source_label, severity_marker};
use crate::export::Exporter;

/// Writes the batch as `report.md`: one section per document with a
/// filename-vs-document table, validation results and notes.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    out_dir: PathBuf,
}

impl MarkdownExporter {
    pub fn new(out_dir: PathBuf) -> Self {
        Self { out_dir }
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, report: &BatchReport) -> Result<()> {
        fs::create_dir_all(&self.out_dir)?;
        fs::write(self.out_dir.join("report.md"), render_markdown(report))?;
        Ok(())
    }
}

pub fn render_markdown(report: &BatchReport) -> String {
    let mut markdown = String::new();
    markdown.push_str("# Print check report\n\n");

    for doc in &report.documents {
        markdown.push_str(&render_document(doc));
    }

    if !report.failures.is_empty() {
        markdown.push_str("---\n\n## Unreadable files\n\n");
        for failure in &report.failures {
            let _ = writeln!(markdown, "- `{}`: {}", failure.name, failure.error);
        }
        markdown.push('\n');
    }
    markdown
}

fn render_document(doc: &DocumentReport) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "---\n\n## {}\n", doc.name);

    let header_size = doc
        .header
        .size
        .map(|size| size.to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let normalized_size = doc
        .normalized
        .size
        .map(|size| size.rounded().to_string())
        .unwrap_or_else(|| NOT_FOUND.to_string());
    let normalized_bleed = doc
        .normalized
        .bleed_mm
        .map(|bleed| format!("{bleed:.1}mm"))
        .unwrap_or_else(|| NOT_FOUND.to_string());

    md.push_str("| Field | File name | Document (normalized) |\n");
    md.push_str("|---|---|---|\n");
    let _ = writeln!(md, "| Size | {} | {} |", cell(&header_size), cell(&normalized_size));
    let _ = writeln!(
        md,
        "| Bleed | {} | {} |",
        cell(&doc.header.bleed_label()),
        cell(&normalized_bleed)
    );
    let _ = writeln!(
        md,
        "| Material | {} | {} |",
        cell(&doc.header.material_label()),
        cell(&doc.body.material_label())
    );
    let _ = writeln!(md, "| Colourspace | | {} |", cell(&doc.body.colourspace_label()));
    let _ = writeln!(
        md,
        "\nScale: **{}%** ({})\n",
        doc.scale.effective_percent as i64,
        scale_source_label(doc.scale.source)
    );

    md.push_str("### Validation\n\n");
    for (field, check) in doc.validation.checks() {
        let _ = writeln!(
            md,
            "- {} **{}**: {}",
            severity_marker(check.severity),
            field,
            check.message
        );
        if let Some(remediation) = &check.remediation {
            for line in remediation.lines() {
                let _ = writeln!(md, "  - {line}");
            }
        }
    }
    md.push('\n');

    if !doc.notes.is_empty() {
        md.push_str("### Notes\n\n");
        for note in &doc.notes {
            let _ = writeln!(md, "- {note}");
        }
        md.push('\n');
    }
    md
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimensions::Dimensions;
    use crate::core::model::{
        BodySpec, FieldCheck, HeaderSpec, LoadFailure, NormalizedBody, ReconciledScale,
        ScaleInference, ScaleSource, Severity, TextSource, Validation, Verdict,
    };

    fn document() -> DocumentReport {
        let ok = FieldCheck::new(Verdict::Match, Severity::Ok, "fine");
        DocumentReport {
            name: "2000x1000 25mm BLEED VINYL CAST.pdf".to_string(),
            header: HeaderSpec {
                size: Some(Dimensions::new(2000, 1000)),
                bleed_mm: Some(25.0),
                material: Some("VINYL CAST".to_string()),
            },
            body: BodySpec {
                colourspace: Some("RGB".to_string()),
                ..BodySpec::default()
            },
            scale: ReconciledScale {
                effective_percent: 1000.0,
                source: ScaleSource::Inferred,
                declared_percent: None,
                inference: ScaleInference::Consistent {
                    percent: 1000.0,
                    swapped: false,
                },
            },
            normalized: NormalizedBody {
                size: Some(Dimensions::new(2000.0, 1000.0)),
                bleed_mm: None,
            },
            validation: Validation {
                size: ok.clone(),
                bleed: ok.clone(),
                material: ok,
                colourspace: FieldCheck::new(Verdict::Mismatch, Severity::Warning, "Colourspace is RGB")
                    .with_remediation("step one\nstep two"),
            },
            text_source: TextSource::Embedded,
            notes: vec!["Scale assumed.".to_string()],
            text_preview: None,
        }
    }

    #[test]
    fn renders_table_validation_and_notes() {
        let md = render_markdown(&BatchReport {
            documents: vec![document()],
            failures: vec![],
        });
        assert!(md.starts_with("# Print check report"));
        assert!(md.contains("## 2000x1000 25mm BLEED VINYL CAST.pdf"));
        assert!(md.contains("| Size | 2000 x 1000 mm | 2000 x 1000 mm |"));
        assert!(md.contains("| Bleed | 25mm | Not found |"));
        assert!(md.contains("| Colourspace | | RGB |"));
        assert!(md.contains("Scale: **1000%** (inferred)"));
        assert!(md.contains("- [!] **colourspace**: Colourspace is RGB\n  - step one\n  - step two"));
        assert!(md.contains("### Notes\n\n- Scale assumed."));
        assert!(!md.contains("Unreadable files"));
    }

    #[test]
    fn lists_unreadable_files() {
        let md = render_markdown(&BatchReport {
            documents: vec![],
            failures: vec![LoadFailure {
                name: "missing.pdf".to_string(),
                error: "No such file".to_string(),
            }],
        });
        assert!(md.contains("## Unreadable files\n\n- `missing.pdf`: No such file"));
    }

    #[test]
    fn escapes_pipes_in_cells() {
        assert_eq!(cell("A|B"), "A\\|B");
    }
}
