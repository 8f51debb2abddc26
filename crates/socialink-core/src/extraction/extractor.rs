//! Combined extractor producing [`ExtractedFields`] from raw OCR text.

use std::time::Instant;

use tracing::debug;

use crate::models::document::ExtractedFields;

use super::rules::{
    DateExtractor, DocumentNumberExtractor, FieldRule, InstitutionExtractor, TitleExtractor,
};

/// Extracts title, institution, issue date and document number.
///
/// Each field is resolved independently by its own ordered rule table.
/// Extraction is pure: the same text always yields the same fields, and
/// text with no recognizable field is a valid, empty result.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    title: TitleExtractor,
    institution: InstitutionExtractor,
    issue_date: DateExtractor,
    document_number: DocumentNumberExtractor,
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract all fields from `text`.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let start = Instant::now();

        let fields = ExtractedFields::new(
            resolve(&self.title, text),
            resolve(&self.institution, text),
            resolve(&self.issue_date, text),
            resolve(&self.document_number, text),
            text,
        );

        debug!(
            "Extracted {} fields from {} characters (confidence {}%) in {:?}",
            fields.fields_found(),
            text.len(),
            fields.confidence(),
            start.elapsed()
        );

        fields
    }
}

fn resolve(rule: &dyn FieldRule, text: &str) -> Option<String> {
    let found = rule.extract(text)?;
    debug!("{} matched by {:?}: {:?}", rule.field(), found.source, found.value);
    Some(found.value)
}
