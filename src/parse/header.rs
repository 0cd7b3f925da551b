use tracing::debug;

use crate::core::dimensions::Dimensions;
use crate::core::materials::MaterialMatcher;
use crate::core::model::HeaderSpec;
use crate::parse::grammar::{HEADER_BLEED, HEADER_SIZE};

/// Reads the print specification encoded in a file name (extension stripped).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser {
    materials: MaterialMatcher,
}

impl HeaderParser {
    pub fn new(materials: MaterialMatcher) -> Self {
        Self { materials }
    }

    pub fn parse(&self, header: &str) -> HeaderSpec {
        let spec = HeaderSpec {
            size: largest_size(header),
            bleed_mm: first_bleed(header),
            material: self.materials.find(header).map(str::to_string),
        };
        debug!(header, ?spec, "parsed file name");
        spec
    }
}

/// Revision codes and similar tokens can also look like sizes, so the
/// candidate with the largest area is taken; on equal area the earliest wins.
fn largest_size(header: &str) -> Option<Dimensions<u32>> {
    HEADER_SIZE
        .captures_iter(header)
        .filter_map(|caps| {
            let width = caps[1].parse().ok()?;
            let height = caps[2].parse().ok()?;
            Some(Dimensions::new(width, height))
        })
        .fold(None, |best: Option<Dimensions<u32>>, candidate| match best {
            Some(current) if current.area() >= candidate.area() => Some(current),
            _ => Some(candidate),
        })
}

fn first_bleed(header: &str) -> Option<f64> {
    HEADER_BLEED
        .captures(header)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .map(f64::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_header() {
        let spec = HeaderParser::default().parse("2000x1000 25mm BLEED VINYL CAST");
        assert_eq!(spec.size, Some(Dimensions::new(2000, 1000)));
        assert_eq!(spec.bleed_mm, Some(25.0));
        assert_eq!(spec.bleed_label(), "25mm");
        assert_eq!(spec.material.as_deref(), Some("VINYL CAST"));
    }

    #[test]
    fn picks_largest_area_candidate() {
        let spec = HeaderParser::default().parse("JOB 12x34 REV 3000X1500 FOAM PVC");
        assert_eq!(spec.size, Some(Dimensions::new(3000, 1500)));
    }

    #[test]
    fn equal_area_keeps_first_candidate() {
        let spec = HeaderParser::default().parse("100x200 then 200x100");
        assert_eq!(spec.size, Some(Dimensions::new(100, 200)));
    }

    #[test]
    fn bleed_suffix_is_optional_and_case_insensitive() {
        let parser = HeaderParser::default();
        assert_eq!(parser.parse("A1 594x841 3MM").bleed_mm, Some(3.0));
        assert_eq!(parser.parse("A1 594x841 5mm bleed").bleed_mm, Some(5.0));
    }

    #[test]
    fn missing_fields_are_absent() {
        let spec = HeaderParser::default().parse("artwork final");
        assert_eq!(spec, HeaderSpec::default());
        assert_eq!(spec.bleed_label(), "Not found");
        assert_eq!(spec.material_label(), "Not found");
    }
}
