//! Field extraction from recognized document text.

mod extractor;
pub mod rules;

pub use extractor::FieldExtractor;
