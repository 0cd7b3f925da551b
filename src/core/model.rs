use serde::{Deserialize, Serialize};

use crate::core::dimensions::Dimensions;

/// Display sentinel for a field the parsers could not resolve.
pub const NOT_FOUND: &str = "Not found";

/// Print specification declared by the file name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HeaderSpec {
    pub size: Option<Dimensions<u32>>,
    pub bleed_mm: Option<f64>,
    pub material: Option<String>,
}

impl HeaderSpec {
    /// `"25mm"` or `"Not found"`.
    pub fn bleed_label(&self) -> String {
        self.bleed_mm
            .map(|bleed| format!("{bleed}mm"))
            .unwrap_or_else(|| NOT_FOUND.to_string())
    }

    pub fn material_label(&self) -> &str {
        self.material.as_deref().unwrap_or(NOT_FOUND)
    }
}

/// Print specification found in the document body, at artwork scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodySpec {
    pub size: Option<Dimensions<f64>>,
    /// The unscaled `Bleed (+N)` allowance.
    pub bleed_allowance_mm: Option<f64>,
    pub declared_scale_percent: Option<f64>,
    pub material: Option<String>,
    pub colourspace: Option<String>,
}

impl BodySpec {
    pub fn material_label(&self) -> &str {
        self.material.as_deref().unwrap_or(NOT_FOUND)
    }

    pub fn colourspace_label(&self) -> &str {
        self.colourspace.as_deref().unwrap_or(NOT_FOUND)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScaleSource {
    Declared,
    Inferred,
    Default,
}

/// Outcome of comparing the header and body sizes as a uniform scaling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScaleInference {
    /// Size missing or zero on either side.
    NotAttempted,
    Consistent { percent: f64, swapped: bool },
    /// Neither orientation gives matching width and height ratios.
    Inconsistent,
}

impl ScaleInference {
    pub fn percent(&self) -> Option<f64> {
        match self {
            ScaleInference::Consistent { percent, .. } => Some(*percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReconciledScale {
    pub effective_percent: f64,
    pub source: ScaleSource,
    pub declared_percent: Option<f64>,
    pub inference: ScaleInference,
}

impl ReconciledScale {
    /// A declared scale was present but overruled by the size comparison.
    pub fn conflicting(&self) -> bool {
        self.source == ScaleSource::Inferred && self.declared_percent.is_some()
    }
}

/// Body measurements brought to finished scale.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedBody {
    pub size: Option<Dimensions<f64>>,
    pub bleed_mm: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Match,
    Mismatch,
    SkippedNoData,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldCheck {
    pub verdict: Verdict,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl FieldCheck {
    pub fn new(verdict: Verdict, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            verdict,
            severity,
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Validation {
    pub size: FieldCheck,
    pub bleed: FieldCheck,
    pub material: FieldCheck,
    pub colourspace: FieldCheck,
}

impl Validation {
    pub fn checks(&self) -> [(&'static str, &FieldCheck); 4] {
        [
            ("size", &self.size),
            ("bleed", &self.bleed),
            ("material", &self.material),
            ("colourspace", &self.colourspace),
        ]
    }

    pub fn worst_severity(&self) -> Severity {
        self.checks()
            .iter()
            .map(|(_, check)| check.severity)
            .max()
            .unwrap_or(Severity::Ok)
    }
}

/// Where the body text came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TextSource {
    Embedded,
    Ocr,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentReport {
    pub name: String,
    pub header: HeaderSpec,
    pub body: BodySpec,
    pub scale: ReconciledScale,
    pub normalized: NormalizedBody,
    pub validation: Validation,
    pub text_source: TextSource,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_preview: Option<String>,
}

/// An input that could not be read at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<LoadFailure>,
}

impl BatchReport {
    pub fn worst_severity(&self) -> Severity {
        self.documents
            .iter()
            .map(|doc| doc.validation.worst_severity())
            .max()
            .unwrap_or(Severity::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_use_not_found_sentinel() {
        let header = HeaderSpec::default();
        assert_eq!(header.bleed_label(), "Not found");
        assert_eq!(header.material_label(), "Not found");

        let header = HeaderSpec {
            bleed_mm: Some(25.0),
            ..HeaderSpec::default()
        };
        assert_eq!(header.bleed_label(), "25mm");
    }

    #[test]
    fn severity_orders_errors_last() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Info > Severity::Ok);
    }

    #[test]
    fn verdict_serializes_snake_case() {
        let json = serde_json::to_string(&Verdict::SkippedNoData).unwrap();
        assert_eq!(json, "\"skipped_no_data\"");
    }
}
