pub mod core;
pub mod export;
pub mod extract;
pub mod ocr;
pub mod parse;
pub mod pipeline;
pub mod reconcile;

pub use crate::core::model::{BatchReport, BodySpec, DocumentReport, HeaderSpec, Verdict};
