use crate::core::model::{
    BodySpec, FieldCheck, HeaderSpec, NormalizedBody, ReconciledScale, Severity, Validation,
    Verdict, NOT_FOUND,
};

/// Scaled bleeds closer than this (in millimetres) match.
const BLEED_TOLERANCE_MM: f64 = 0.5;
const PRESS_COLOURSPACE: &str = "CMYK";
const CMYK_REMEDIATION: &str =
    "Illustrator: Edit → Convert to Profile → Select CMYK\nPhotoshop: Image → Mode → CMYK";

/// Compares the file-name specification against the scale-normalised body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, body: &BodySpec, scale: &ReconciledScale) -> NormalizedBody {
        let percent = scale.effective_percent;
        NormalizedBody {
            size: body.size.map(|size| size.scaled(percent)),
            bleed_mm: body.bleed_allowance_mm.map(|bleed| bleed * percent / 100.0),
        }
    }

    pub fn validate(
        &self,
        header: &HeaderSpec,
        body: &BodySpec,
        normalized: &NormalizedBody,
    ) -> Validation {
        Validation {
            size: check_size(header, normalized),
            bleed: check_bleed(header, normalized),
            material: check_material(header, body),
            colourspace: check_colourspace(body),
        }
    }
}

fn check_size(header: &HeaderSpec, normalized: &NormalizedBody) -> FieldCheck {
    match (header.size, normalized.size) {
        (Some(expected), Some(actual)) if actual.matches_either_orientation(&expected) => {
            FieldCheck::new(Verdict::Match, Severity::Ok, "Size matches after scale adjustment.")
        }
        (Some(expected), Some(actual)) => FieldCheck::new(
            Verdict::Mismatch,
            Severity::Error,
            format!(
                "Size mismatch after scale adjustment: file name says {expected}, document gives {}.",
                actual.rounded()
            ),
        ),
        (None, _) => FieldCheck::new(
            Verdict::SkippedNoData,
            Severity::Info,
            "Size not provided in filename, skipped size comparison.",
        ),
        (_, None) => FieldCheck::new(
            Verdict::SkippedNoData,
            Severity::Info,
            "Finished size not found in document, skipped size comparison.",
        ),
    }
}

fn check_bleed(header: &HeaderSpec, normalized: &NormalizedBody) -> FieldCheck {
    let Some(expected) = header.bleed_mm else {
        return FieldCheck::new(
            Verdict::SkippedNoData,
            Severity::Info,
            "Bleed not provided in filename, skipped bleed comparison.",
        );
    };
    match normalized.bleed_mm {
        Some(actual) if (actual - expected).abs() < BLEED_TOLERANCE_MM => {
            FieldCheck::new(Verdict::Match, Severity::Ok, "Bleed matches after scaling.")
        }
        Some(actual) => FieldCheck::new(
            Verdict::Mismatch,
            Severity::Error,
            format!("Bleed mismatch: file name says {expected}mm, document gives {actual:.1}mm."),
        ),
        None => FieldCheck::new(
            Verdict::Mismatch,
            Severity::Error,
            format!("Bleed mismatch: file name says {expected}mm, document declares no bleed."),
        ),
    }
}

/// Material ambiguity is common in supplied artwork, so every non-match is
/// only a warning.
fn check_material(header: &HeaderSpec, body: &BodySpec) -> FieldCheck {
    match (&header.material, &body.material) {
        (Some(expected), Some(actual))
            if actual.to_lowercase().contains(&expected.to_lowercase()) =>
        {
            FieldCheck::new(Verdict::Match, Severity::Ok, "Material matches.")
        }
        (Some(expected), Some(actual)) => FieldCheck::new(
            Verdict::Mismatch,
            Severity::Warning,
            format!("Material mismatch: file name says {expected}, document says {actual}."),
        ),
        _ => FieldCheck::new(
            Verdict::SkippedNoData,
            Severity::Warning,
            "Material not found in filename or document.",
        ),
    }
}

/// Missing colourspace information is itself actionable, so this check never
/// skips.
fn check_colourspace(body: &BodySpec) -> FieldCheck {
    let normalized = body.colourspace.as_deref().map(normalize_colourspace);
    match normalized.as_deref() {
        Some(PRESS_COLOURSPACE) => {
            FieldCheck::new(Verdict::Match, Severity::Ok, "Colourspace is CMYK.")
        }
        other => FieldCheck::new(
            Verdict::Mismatch,
            Severity::Warning,
            format!(
                "Colourspace is {}, consider converting to CMYK in Illustrator or Photoshop.",
                other.unwrap_or(NOT_FOUND)
            ),
        )
        .with_remediation(CMYK_REMEDIATION),
    }
}

/// `"DeviceCMYK"` becomes `"CMYK"`.
pub fn normalize_colourspace(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    upper
        .strip_prefix("DEVICE")
        .map(str::to_string)
        .unwrap_or(upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dimensions::Dimensions;
    use crate::core::model::{ScaleInference, ScaleSource};
    use pretty_assertions::assert_eq;

    fn scale(percent: f64) -> ReconciledScale {
        ReconciledScale {
            effective_percent: percent,
            source: ScaleSource::Declared,
            declared_percent: Some(percent),
            inference: ScaleInference::NotAttempted,
        }
    }

    fn header() -> HeaderSpec {
        HeaderSpec {
            size: Some(Dimensions::new(2000, 1000)),
            bleed_mm: Some(25.0),
            material: Some("VINYL CAST".to_string()),
        }
    }

    fn body() -> BodySpec {
        BodySpec {
            size: Some(Dimensions::new(200.0, 100.0)),
            bleed_allowance_mm: Some(2.5),
            declared_scale_percent: Some(1000.0),
            material: Some("VINYL CAST".to_string()),
            colourspace: Some("DEVICECMYK".to_string()),
        }
    }

    #[test]
    fn normalizes_size_and_bleed() {
        let normalized = Validator::new().normalize(&body(), &scale(1000.0));
        assert_eq!(normalized.size, Some(Dimensions::new(2000.0, 1000.0)));
        assert_eq!(normalized.bleed_mm, Some(25.0));
    }

    #[test]
    fn everything_matches_at_correct_scale() {
        let validator = Validator::new();
        let normalized = validator.normalize(&body(), &scale(1000.0));
        let validation = validator.validate(&header(), &body(), &normalized);
        for (field, check) in validation.checks() {
            assert_eq!(check.verdict, Verdict::Match, "{field}: {}", check.message);
        }
        assert_eq!(validation.worst_severity(), Severity::Ok);
    }

    #[test]
    fn wrong_scale_is_a_hard_mismatch() {
        let validator = Validator::new();
        let normalized = validator.normalize(&body(), &scale(100.0));
        let validation = validator.validate(&header(), &body(), &normalized);
        assert_eq!(validation.size.verdict, Verdict::Mismatch);
        assert_eq!(validation.bleed.verdict, Verdict::Mismatch);
        assert_eq!(validation.worst_severity(), Severity::Error);
    }

    #[test]
    fn swapped_size_matches() {
        let mut body = body();
        body.size = Some(Dimensions::new(100.0, 200.0));
        let validator = Validator::new();
        let normalized = validator.normalize(&body, &scale(1000.0));
        assert_eq!(
            validator.validate(&header(), &body, &normalized).size.verdict,
            Verdict::Match
        );
    }

    #[test]
    fn absent_header_size_is_skipped_not_mismatch() {
        let header = HeaderSpec {
            size: None,
            ..header()
        };
        let validator = Validator::new();
        let normalized = validator.normalize(&body(), &scale(1000.0));
        let validation = validator.validate(&header, &body(), &normalized);
        assert_eq!(validation.size.verdict, Verdict::SkippedNoData);
        assert_eq!(validation.size.severity, Severity::Info);
    }

    #[test]
    fn bleed_skipped_only_when_filename_lacks_it() {
        let validator = Validator::new();
        let header = HeaderSpec {
            bleed_mm: None,
            ..header()
        };
        let normalized = validator.normalize(&body(), &scale(1000.0));
        assert_eq!(
            validator.validate(&header, &body(), &normalized).bleed.verdict,
            Verdict::SkippedNoData
        );

        let body = BodySpec {
            bleed_allowance_mm: None,
            ..body()
        };
        let normalized = validator.normalize(&body, &scale(1000.0));
        assert_eq!(
            validator.validate(&self::header(), &body, &normalized).bleed.verdict,
            Verdict::Mismatch
        );
    }

    #[test]
    fn bleed_tolerance_is_half_a_millimetre() {
        let validator = Validator::new();
        let mut normalized = validator.normalize(&body(), &scale(1000.0));
        normalized.bleed_mm = Some(25.4);
        assert_eq!(
            validator.validate(&header(), &body(), &normalized).bleed.verdict,
            Verdict::Match
        );
        normalized.bleed_mm = Some(25.5);
        assert_eq!(
            validator.validate(&header(), &body(), &normalized).bleed.verdict,
            Verdict::Mismatch
        );
    }

    #[test]
    fn material_is_substring_match_and_warning_only() {
        let validator = Validator::new();
        let mut body = body();
        body.material = Some("FOAM PVC".to_string());
        let normalized = validator.normalize(&body, &scale(1000.0));
        let check = validator.validate(&header(), &body, &normalized).material;
        assert_eq!(check.verdict, Verdict::Mismatch);
        assert_eq!(check.severity, Severity::Warning);

        body.material = None;
        let check = validator.validate(&header(), &body, &normalized).material;
        assert_eq!(check.verdict, Verdict::SkippedNoData);
        assert_eq!(check.severity, Severity::Warning);
    }

    #[test]
    fn colourspace_normalization() {
        assert_eq!(normalize_colourspace("DeviceCMYK"), "CMYK");
        assert_eq!(normalize_colourspace("cmyk"), "CMYK");
        assert_eq!(normalize_colourspace("DeviceRGB"), "RGB");
    }

    #[test]
    fn non_cmyk_and_missing_colourspace_warn_with_hint() {
        let validator = Validator::new();
        let normalized = NormalizedBody::default();

        let rgb = BodySpec {
            colourspace: Some("RGB".to_string()),
            ..BodySpec::default()
        };
        let check = validator.validate(&header(), &rgb, &normalized).colourspace;
        assert_eq!(check.verdict, Verdict::Mismatch);
        assert_eq!(check.severity, Severity::Warning);
        assert!(check.message.contains("Colourspace is RGB"));
        assert!(check.remediation.as_deref().unwrap().contains("Image → Mode → CMYK"));

        let missing = validator
            .validate(&header(), &BodySpec::default(), &normalized)
            .colourspace;
        assert_eq!(missing.verdict, Verdict::Mismatch);
        assert!(missing.message.contains("Not found"));
    }
}
