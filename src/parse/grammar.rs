//! Pattern rules for the file-name and document-body conventions.
//!
//! Every rule names its captures. Numbers are ASCII digits only; body text is
//! NFKC-normalised before matching, which folds full-width digits to ASCII.

use once_cell::sync::Lazy;
use regex::Regex;

/// `SIZE := INT{2,5} WS* ("x" | "X") WS* INT{2,5}`
///
/// Captures: 1 = width, 2 = height. All occurrences are collected.
pub static HEADER_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{2,5})\s*[xX]\s*([0-9]{2,5})").unwrap());

/// `BLEED := INT{1,3} "mm" (WS* "BLEED")?`, case-insensitive.
///
/// Captures: 1 = bleed in whole millimetres. First occurrence wins.
pub static HEADER_BLEED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([0-9]{1,3})mm(?:\s*BLEED)?").unwrap());

/// Boilerplate lines dropped before body parsing; anchored at line start,
/// case-insensitive. "Transparancies" is spelled as the preflight tools emit it.
pub static BODY_STOPLIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:PDF Version|ICC Profile|Sizes|Overprints|Transparancies)").unwrap()
});

/// `FINISHED := "Finished Size:" WS* NUM WS* ("x" | "X") WS* NUM "mm"`
///
/// Captures: 1 = width, 2 = height, at artwork scale.
pub static BODY_FINISHED_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Finished Size:\s*([0-9]+\.?[0-9]*)\s*[xX]\s*([0-9]+\.?[0-9]*)mm").unwrap()
});

/// `BLEED := "Bleed" WS* "(+" NUM "):" WS* NUM WS* ("x" | "X") WS* NUM "mm"`
///
/// Captures: 1 = the allowance inside the parentheses. The bled dimensions
/// after the colon must be present but are not captured.
pub static BODY_BLEED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Bleed\s*\(\+([0-9]+(?:\.[0-9]+)?)\):\s*[0-9]+\.?[0-9]*\s*[xX]\s*[0-9]+\.?[0-9]*mm",
    )
    .unwrap()
});

/// `SCALE := NUM "%"`, first occurrence anywhere in the cleaned text.
pub static BODY_SCALE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)%").unwrap());

/// `COLOURSPACE := "Colourspace" WS* ":" WS* WORD`, case-insensitive.
///
/// Captures: 1 = the colourspace word, upper-cased by the caller.
pub static BODY_COLOURSPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Colourspace\s*:\s*(\w+)").unwrap());
