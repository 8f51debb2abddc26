//! Issuing institution extraction.

use super::patterns::{INSTITUTION_PATTERNS, KNOWN_INSTITUTIONS};
use super::{first_match, Capture, FieldRule, MatchSource, RuleMatch};

/// Institution field extractor.
///
/// Lead-in keywords (université, faculté, école...) are tried first; the
/// list of known Moroccan institution names is only searched when none of
/// them matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstitutionExtractor;

impl InstitutionExtractor {
    pub fn new() -> Self {
        Self
    }

    fn known_name(&self, text: &str) -> Option<RuleMatch> {
        let haystack = text.to_lowercase();

        KNOWN_INSTITUTIONS
            .iter()
            .enumerate()
            .find(|(_, name)| haystack.contains(&name.to_lowercase()))
            .map(|(index, name)| RuleMatch::new(*name, MatchSource::KnownName(index)))
    }
}

impl FieldRule for InstitutionExtractor {
    fn field(&self) -> &'static str {
        "institution"
    }

    fn extract(&self, text: &str) -> Option<RuleMatch> {
        first_match(&INSTITUTION_PATTERNS, text, Capture::GroupOrWhole)
            .or_else(|| self.known_name(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn institution(text: &str) -> Option<String> {
        InstitutionExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_university_lead_in() {
        assert_eq!(
            institution("Université Mohammed V - Rabat"),
            Some("Mohammed V - Rabat".to_string())
        );
    }

    #[test]
    fn test_other_lead_ins() {
        assert_eq!(
            institution("Faculté des Sciences Juridiques"),
            Some("des Sciences Juridiques".to_string())
        );
        assert_eq!(
            institution("ÉCOLE Nationale de Commerce"),
            Some("Nationale de Commerce".to_string())
        );
        assert_eq!(
            institution("Institut National de l'Action Sociale - Tanger"),
            Some("National de l'Action Sociale - Tanger".to_string())
        );
    }

    #[test]
    fn test_rule_order_beats_text_order() {
        let text = "Centre de Formation Continue\nUniversité Hassan II";
        assert_eq!(institution(text), Some("Hassan II".to_string()));
    }

    #[test]
    fn test_pattern_wins_over_known_names() {
        let result = InstitutionExtractor::new()
            .extract("Université Mohammed V - Rabat")
            .unwrap();
        assert_eq!(result.source, MatchSource::Pattern(0));
    }

    #[test]
    fn test_known_name_fallback() {
        let result = InstitutionExtractor::new()
            .extract("Lauréat de cadi ayyad, Marrakech")
            .unwrap();
        assert_eq!(result.value, "Cadi Ayyad");
        assert_eq!(result.source, MatchSource::KnownName(2));
        assert_eq!(result.position, None);
    }

    #[test]
    fn test_known_names_searched_in_list_order() {
        assert_eq!(
            institution("Lauréat ENCG Settat, ancien de Hassan II"),
            Some("Hassan II".to_string())
        );
        assert_eq!(institution("Lauréat ENCG Settat"), Some("ENCG".to_string()));
    }

    #[test]
    fn test_no_institution() {
        assert_eq!(institution(""), None);
        assert_eq!(institution("Fait à Rabat"), None);
    }
}
