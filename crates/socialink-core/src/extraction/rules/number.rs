//! Document number extraction (N°, matricule, référence, CIN).

use super::patterns::NUMBER_PATTERNS;
use super::{first_match, Capture, FieldRule, RuleMatch};

/// Document number extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentNumberExtractor;

impl DocumentNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldRule for DocumentNumberExtractor {
    fn field(&self) -> &'static str {
        "document_number"
    }

    fn extract(&self, text: &str) -> Option<RuleMatch> {
        first_match(&NUMBER_PATTERNS, text, Capture::GroupOrWhole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::MatchSource;

    fn number(text: &str) -> Option<String> {
        DocumentNumberExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_numero_label() {
        assert_eq!(number("N° 12345"), Some("12345".to_string()));
        assert_eq!(number("N°12345"), Some("12345".to_string()));
        assert_eq!(number("No. A/123"), Some("A/123".to_string()));
    }

    #[test]
    fn test_numero_with_qualifier() {
        assert_eq!(number("N° étudiant : 2018-0456"), Some("2018-0456".to_string()));
        assert_eq!(number("N° Matricule: 77881"), Some("77881".to_string()));
        assert_eq!(number("N° série 0042/B"), Some("0042/B".to_string()));
    }

    #[test]
    fn test_words_starting_with_no_are_not_labels() {
        assert_eq!(number("Nom : Ahmed"), None);
        assert_eq!(number("Nouvelle session"), None);
    }

    #[test]
    fn test_matricule_and_reference() {
        assert_eq!(number("Matricule : M-7789"), Some("M-7789".to_string()));
        assert_eq!(
            number("Référence : REF/2020/15"),
            Some("REF/2020/15".to_string())
        );
    }

    #[test]
    fn test_national_id() {
        let result = DocumentNumberExtractor::new().extract("CIN : AB123456").unwrap();
        assert_eq!(result.value, "AB123456");
        assert_eq!(result.source, MatchSource::Pattern(3));

        assert_eq!(number("Carte Nationale : K987654"), Some("K987654".to_string()));
        assert_eq!(
            number("Carte nationale d'identité : BE45678"),
            Some("BE45678".to_string())
        );
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(number("Référence : R-1\nN° 42"), Some("42".to_string()));
    }

    #[test]
    fn test_no_number() {
        assert_eq!(number(""), None);
        assert_eq!(number("Diplôme de Licence"), None);
    }
}
