/// Canonical print materials. Declaration order is significant: the matcher
/// returns the first entry whose leading tokens are found, so shorter names
/// must stay ahead of their longer variants.
pub static CANONICAL_MATERIALS: &[&str] = &[
    "CORRUGATED",
    "MESH COATED",
    "PVC BLACK WHITE MATTE",
    "MAGNETIC PRINT",
    "CORREX",
    "TEAR RESISTANT SATIN",
    "VINYL POLYMERIC",
    "FABRIC FRONTLIT",
    "VINYL WHITE GLOSS",
    "VINYL ONE WAY VISION",
    "FOAM PVC",
    "ACRYLIC XT CLEAR",
    "VINYL CAST",
    "WALLPAPER",
    "STYRENE",
    "FABRIWALL",
    "FABRIC BACKLIT",
    "FILM BACKLIT",
    "HI Q",
    "CHROMADECK",
    "VINYL FROSTED",
    "WOOD (MDF)",
    "PE BLACK WHITE",
    "PP SILICONE WINDOW FILM",
    "VINYL EASYDOT",
    "TRANSFER PAPER",
    "APET CLEAR",
    "VINYL WALL OUTDOOR",
    "KRAFTBOARD",
    "BIE-VINYL",
    "MAGNETIC FERRIS PAPER",
    "VINYL- WINDOW- FLUX",
    "HI-Q Titan Gloss",
    "PVC BACKLIT",
    "MESH COATED (Large perforation)",
    "WALLPAPER- FINE SAND TEXTURED",
    "B-SILKYSMOOTH WALLCOVERING",
    "B-WALLCOVERING-CANVAS PREMIUM",
    "WALLPAPER- (B TEX)",
    "VINYL POLYMERIC B/ O WHITE GLOSS",
    "FABRIC WHITE BLACK",
    "FABRIC BACKLIT (LED)",
    "FABRIC TEXTILE BACKLIT (LED)",
    "TEAR RESISTANT SATIN PREMIUM",
    "MAGNETIC PRINT 0.6MM",
];

/// Number of leading name tokens that must all appear in the searched text.
const KEY_TOKENS: usize = 2;

/// Looks up a canonical material name inside free text.
///
/// A name matches when each of its first two whitespace-separated tokens,
/// lowercased, occurs somewhere in the lowercased text. Tokens are tested
/// independently as substrings; their order and adjacency are ignored.
#[derive(Debug, Clone, Copy)]
pub struct MaterialMatcher {
    table: &'static [&'static str],
}

impl Default for MaterialMatcher {
    fn default() -> Self {
        Self::new(CANONICAL_MATERIALS)
    }
}

impl MaterialMatcher {
    pub fn new(table: &'static [&'static str]) -> Self {
        Self { table }
    }

    pub fn find(&self, text: &str) -> Option<&'static str> {
        let haystack = text.to_lowercase();
        self.table
            .iter()
            .copied()
            .find(|name| key_tokens(name).all(|token| haystack.contains(token.as_str())))
    }
}

fn key_tokens(name: &str) -> impl Iterator<Item = String> + '_ {
    name.split_whitespace()
        .take(KEY_TOKENS)
        .map(|token| token.to_lowercase())
}
