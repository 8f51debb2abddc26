//! Document title extraction (diplôme, certificat, licence, master...).

use super::patterns::TITLE_PATTERNS;
use super::{first_match, Capture, FieldRule, RuleMatch};

/// Title field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleExtractor;

impl TitleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldRule for TitleExtractor {
    fn field(&self) -> &'static str {
        "title"
    }

    fn extract(&self, text: &str) -> Option<RuleMatch> {
        first_match(&TITLE_PATTERNS, text, Capture::GroupOrWhole)
    }
}
