pub mod body;
pub mod grammar;
pub mod header;

pub use body::BodyParser;
pub use header::HeaderParser;
