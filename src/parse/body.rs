use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::core::dimensions::Dimensions;
use crate::core::materials::MaterialMatcher;
use crate::core::model::BodySpec;
use crate::parse::grammar::{
    BODY_BLEED, BODY_COLOURSPACE, BODY_FINISHED_SIZE, BODY_SCALE, BODY_STOPLIST,
};

/// Reads the print specification from extracted document text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyParser {
    materials: MaterialMatcher,
}

impl BodyParser {
    pub fn new(materials: MaterialMatcher) -> Self {
        Self { materials }
    }

    pub fn parse(&self, text: &str) -> BodySpec {
        let cleaned = clean_text(text);

        let size = BODY_FINISHED_SIZE.captures(&cleaned).and_then(|caps| {
            let width = caps[1].parse::<f64>().ok()?;
            let height = caps[2].parse::<f64>().ok()?;
            Some(Dimensions::new(width, height))
        });

        let bleed_allowance_mm = BODY_BLEED
            .captures(&cleaned)
            .and_then(|caps| caps[1].parse::<f64>().ok());

        let declared_scale_percent = BODY_SCALE
            .captures(&cleaned)
            .and_then(|caps| caps[1].parse::<f64>().ok());

        let colourspace = BODY_COLOURSPACE
            .captures(&cleaned)
            .map(|caps| caps[1].to_uppercase());

        let spec = BodySpec {
            size,
            bleed_allowance_mm,
            declared_scale_percent,
            material: self.materials.find(&cleaned).map(str::to_string),
            colourspace,
        };
        debug!(?spec, "parsed document body");
        spec
    }
}

/// NFKC-normalises the text and drops stoplisted boilerplate lines.
pub fn clean_text(text: &str) -> String {
    let normalized: String = text.nfkc().collect();
    normalized
        .lines()
        .filter(|line| !BODY_STOPLIST.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
}
