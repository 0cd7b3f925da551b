use tracing::{debug, warn};

use crate::core::dimensions::Dimensions;
use crate::core::model::{BodySpec, HeaderSpec, ReconciledScale, ScaleInference, ScaleSource};

/// Maximum difference between width and height ratios for a uniform scaling.
const RATIO_TOLERANCE: f64 = 0.1;
/// Declared and inferred scales closer than this (in percentage points) agree.
const AGREEMENT_POINTS: f64 = 1.0;
pub const DEFAULT_SCALE_PERCENT: f64 = 100.0;

/// Derives the factor that brings the body's artwork size to the finished
/// size named in the file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScaleReconciler;

impl ScaleReconciler {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile(&self, header: &HeaderSpec, body: &BodySpec) -> ReconciledScale {
        let inference = match (header.size, body.size) {
            (Some(header_size), Some(body_size)) => infer_scale(header_size, body_size),
            _ => ScaleInference::NotAttempted,
        };
        if inference == ScaleInference::Inconsistent {
            warn!(
                header = ?header.size,
                body = ?body.size,
                "sizes are not a uniform scaling of each other; scale not inferable"
            );
        }

        let declared = body.declared_scale_percent.filter(|p| usable(*p));
        let inferred = inference.percent().filter(|p| usable(*p));

        let (effective_percent, source) = match (declared, inferred) {
            (Some(d), Some(i)) if (d - i).abs() < AGREEMENT_POINTS => (d, ScaleSource::Declared),
            (Some(d), Some(i)) => {
                warn!(declared = d, inferred = i, "declared scale conflicts with size comparison");
                (i, ScaleSource::Inferred)
            }
            (Some(d), None) => (d, ScaleSource::Declared),
            (None, Some(i)) => (i, ScaleSource::Inferred),
            (None, None) => (DEFAULT_SCALE_PERCENT, ScaleSource::Default),
        };

        debug!(effective_percent, ?source, ?inference, "reconciled scale");
        ReconciledScale {
            effective_percent,
            source,
            declared_percent: declared,
            inference,
        }
    }
}

/// Ratio test in direct orientation first, then with the header swapped.
pub fn infer_scale(header: Dimensions<u32>, body: Dimensions<f64>) -> ScaleInference {
    if header.is_degenerate() || body.is_degenerate() {
        return ScaleInference::NotAttempted;
    }
    let header = header.to_f64();

    let width_ratio = header.width / body.width;
    let height_ratio = header.height / body.height;
    if (width_ratio - height_ratio).abs() < RATIO_TOLERANCE {
        return ScaleInference::Consistent {
            percent: width_ratio * 100.0,
            swapped: false,
        };
    }

    let alt_width_ratio = header.height / body.width;
    let alt_height_ratio = header.width / body.height;
    if (alt_width_ratio - alt_height_ratio).abs() < RATIO_TOLERANCE {
        return ScaleInference::Consistent {
            percent: alt_width_ratio * 100.0,
            swapped: true,
        };
    }

    ScaleInference::Inconsistent
}

fn usable(percent: f64) -> bool {
    percent.is_finite() && percent > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header(w: u32, h: u32) -> HeaderSpec {
        HeaderSpec {
            size: Some(Dimensions::new(w, h)),
            ..HeaderSpec::default()
        }
    }

    fn body(w: f64, h: f64, declared: Option<f64>) -> BodySpec {
        BodySpec {
            size: Some(Dimensions::new(w, h)),
            declared_scale_percent: declared,
            ..BodySpec::default()
        }
    }

    #[test]
    fn infers_scale_from_sizes() {
        let scale = ScaleReconciler::new().reconcile(&header(2000, 1000), &body(200.0, 100.0, None));
        assert_eq!(scale.effective_percent, 1000.0);
        assert_eq!(scale.source, ScaleSource::Inferred);
        assert_eq!(
            scale.inference,
            ScaleInference::Consistent {
                percent: 1000.0,
                swapped: false
            }
        );
    }

    #[test]
    fn corroborated_declared_scale_wins() {
        let scale =
            ScaleReconciler::new().reconcile(&header(2000, 1000), &body(200.0, 100.0, Some(1000.0)));
        assert_eq!(scale.source, ScaleSource::Declared);
        assert_eq!(scale.effective_percent, 1000.0);
        assert!(!scale.conflicting());
    }

    #[test]
    fn declared_within_one_point_is_kept_verbatim() {
        let scale =
            ScaleReconciler::new().reconcile(&header(2000, 1000), &body(200.0, 100.0, Some(999.5)));
        assert_eq!(scale.source, ScaleSource::Declared);
        assert_eq!(scale.effective_percent, 999.5);
    }

    #[test]
    fn conflicting_declared_scale_yields_to_inference() {
        let scale =
            ScaleReconciler::new().reconcile(&header(2000, 1000), &body(200.0, 100.0, Some(50.0)));
        assert_eq!(scale.source, ScaleSource::Inferred);
        assert_eq!(scale.effective_percent, 1000.0);
        assert!(scale.conflicting());
    }

    #[test]
    fn handles_swapped_orientation() {
        let inference = infer_scale(Dimensions::new(1000, 2000), Dimensions::new(200.0, 100.0));
        assert_eq!(
            inference,
            ScaleInference::Consistent {
                percent: 1000.0,
                swapped: true
            }
        );
    }

    #[test]
    fn non_uniform_sizes_are_not_inferable() {
        let scale = ScaleReconciler::new().reconcile(&header(2000, 1000), &body(200.0, 200.0, None));
        assert_eq!(scale.inference, ScaleInference::Inconsistent);
        assert_eq!(scale.source, ScaleSource::Default);
        assert_eq!(scale.effective_percent, 100.0);
    }

    #[test]
    fn missing_size_falls_back_to_declared_then_default() {
        let reconciler = ScaleReconciler::new();
        let no_size = BodySpec {
            declared_scale_percent: Some(25.0),
            ..BodySpec::default()
        };
        let scale = reconciler.reconcile(&header(2000, 1000), &no_size);
        assert_eq!(scale.inference, ScaleInference::NotAttempted);
        assert_eq!(scale.source, ScaleSource::Declared);
        assert_eq!(scale.effective_percent, 25.0);

        let scale = reconciler.reconcile(&HeaderSpec::default(), &BodySpec::default());
        assert_eq!(scale.source, ScaleSource::Default);
        assert_eq!(scale.effective_percent, DEFAULT_SCALE_PERCENT);
    }

    #[test]
    fn zero_sizes_and_scales_are_ignored() {
        let reconciler = ScaleReconciler::new();
        let scale = reconciler.reconcile(&header(2000, 1000), &body(0.0, 100.0, Some(0.0)));
        assert_eq!(scale.inference, ScaleInference::NotAttempted);
        assert_eq!(scale.source, ScaleSource::Default);
        assert_eq!(scale.declared_percent, None);
    }
}
