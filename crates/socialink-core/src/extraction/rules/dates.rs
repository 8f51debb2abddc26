//! Issue date extraction.
//!
//! Dates are returned exactly as matched. OCR noise makes calendar parsing
//! unreliable at this stage, so callers parse the value themselves.

use super::patterns::DATE_PATTERNS;
use super::{first_match, Capture, FieldRule, RuleMatch};

/// Issue date extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldRule for DateExtractor {
    fn field(&self) -> &'static str {
        "issue_date"
    }

    fn extract(&self, text: &str) -> Option<RuleMatch> {
        first_match(&DATE_PATTERNS, text, Capture::Whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::rules::MatchSource;

    fn date(text: &str) -> Option<String> {
        DateExtractor::new().extract(text).map(|m| m.value)
    }

    #[test]
    fn test_extract_date_dmy() {
        assert_eq!(date("Obtenu le 15/06/2018"), Some("15/06/2018".to_string()));
        assert_eq!(date("le 15-06-2018"), Some("15-06-2018".to_string()));
        assert_eq!(date("le 15.06.2018"), Some("15.06.2018".to_string()));
    }

    #[test]
    fn test_labeled_date_with_compact_token_keeps_date_only() {
        let result = DateExtractor::new().extract("délivré le 15/06/2018").unwrap();
        assert_eq!(result.value, "15/06/2018");
        assert_eq!(result.source, MatchSource::Pattern(0));
    }

    #[test]
    fn test_extract_date_ymd() {
        assert_eq!(date("Session 2018-06-15"), Some("2018-06-15".to_string()));
    }

    #[test]
    fn test_extract_french_long_date() {
        assert_eq!(
            date("Fait à Rabat, le 3 juillet 2019"),
            Some("3 juillet 2019".to_string())
        );
        assert_eq!(date("1er Décembre 2020"), Some("1er Décembre 2020".to_string()));
    }

    #[test]
    fn test_labeled_dates_with_spaced_separators() {
        assert_eq!(
            date("Délivré le 15 / 06 / 2018"),
            Some("Délivré le 15 / 06 / 2018".to_string())
        );
        assert_eq!(
            date("Obtenue le : 01 - 09 - 2017"),
            Some("Obtenue le : 01 - 09 - 2017".to_string())
        );
        assert_eq!(date("Date : 3 . 4 . 2021"), Some("Date : 3 . 4 . 2021".to_string()));
    }

    #[test]
    fn test_garbled_year_is_kept() {
        assert_eq!(date("le 15/06/201"), Some("15/06/201".to_string()));
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            date("Session 2019-01-02, délibération du 15/06/2018"),
            Some("15/06/2018".to_string())
        );
    }

    #[test]
    fn test_no_date() {
        assert_eq!(date(""), None);
        assert_eq!(date("Promotion 2018"), None);
    }
}
