//! Rule-based field extractors for diplomas, certificates and ID documents.

pub mod dates;
pub mod institution;
pub mod number;
pub mod patterns;
pub mod title;

pub use dates::DateExtractor;
pub use institution::InstitutionExtractor;
pub use number::DocumentNumberExtractor;
pub use title::TitleExtractor;

use regex::Regex;

/// Trait for single-field extractors.
pub trait FieldRule {
    /// Name of the field, used in logs.
    fn field(&self) -> &'static str;

    /// Extract the field using the first matching rule.
    fn extract(&self, text: &str) -> Option<RuleMatch>;
}

/// Which rule produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Index into the field's pattern table.
    Pattern(usize),
    /// Index into the known institution name list.
    KnownName(usize),
}

/// A field value together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Extracted value, trimmed.
    pub value: String,
    /// Rule that matched.
    pub source: MatchSource,
    /// Byte span of the value in the source text.
    pub position: Option<(usize, usize)>,
}

impl RuleMatch {
    pub fn new(value: impl Into<String>, source: MatchSource) -> Self {
        Self {
            value: value.into(),
            source,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// What part of a pattern match becomes the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Capture {
    /// First capture group when the pattern has one, otherwise the whole match.
    GroupOrWhole,
    /// Always the whole match.
    Whole,
}

/// Run `rules` in order and return the first hit.
pub(crate) fn first_match(rules: &[Regex], text: &str, capture: Capture) -> Option<RuleMatch> {
    rules.iter().enumerate().find_map(|(index, rule)| {
        let caps = rule.captures(text)?;
        let m = match capture {
            Capture::GroupOrWhole => caps.get(1).or_else(|| caps.get(0)),
            Capture::Whole => caps.get(0),
        }?;

        let raw = m.as_str();
        let value = raw.trim();
        let start = m.start() + (raw.len() - raw.trim_start().len());

        Some(
            RuleMatch::new(value, MatchSource::Pattern(index))
                .with_position(start, start + value.len()),
        )
    })
}
