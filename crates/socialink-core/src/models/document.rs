//! Extracted document fields and the processing result envelope.

use serde::{Serialize, Serializer};

/// Number of fields that contribute to the confidence score.
pub const SCORED_FIELDS: usize = 4;

/// Structured fields recovered from a scanned diploma, certificate or ID.
///
/// `confidence` is derived from how many of the four scored fields were
/// found and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFields {
    title: Option<String>,
    institution: Option<String>,
    issue_date: Option<String>,
    document_number: Option<String>,
    confidence: u8,
    raw_text: String,
}

impl ExtractedFields {
    /// Build a field set and compute its confidence.
    pub fn new(
        title: Option<String>,
        institution: Option<String>,
        issue_date: Option<String>,
        document_number: Option<String>,
        raw_text: impl Into<String>,
    ) -> Self {
        let mut fields = Self {
            title,
            institution,
            issue_date,
            document_number,
            confidence: 0,
            raw_text: raw_text.into(),
        };
        fields.confidence = confidence_for(fields.fields_found());
        fields
    }

    /// All fields empty, confidence 0 and an empty raw text placeholder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Best-guess document title (diploma, certificate, degree name).
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Best-guess issuing body.
    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    /// Raw matched date text; not normalized.
    pub fn issue_date(&self) -> Option<&str> {
        self.issue_date.as_deref()
    }

    /// Reference, matricule or ID number.
    pub fn document_number(&self) -> Option<&str> {
        self.document_number.as_deref()
    }

    /// Percentage of scored fields found (0, 25, 50, 75 or 100).
    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    /// Recognized text the fields were extracted from.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Count of non-null fields among title, institution, issue date and number.
    pub fn fields_found(&self) -> usize {
        [
            &self.title,
            &self.institution,
            &self.issue_date,
            &self.document_number,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

fn confidence_for(found: usize) -> u8 {
    ((found as f64 / SCORED_FIELDS as f64) * 100.0).round() as u8
}

/// Outcome of processing one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingResult {
    /// Text was recognized and fields extracted.
    Success { data: ExtractedFields },
    /// The call succeeded but the data is incomplete.
    SuccessWithWarning { warning: String, data: ExtractedFields },
    /// The document could not be processed.
    Failure { error: String },
}

impl ProcessingResult {
    /// Whether the call succeeded, with or without a warning.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }

    /// Extracted data, absent on failure.
    pub fn data(&self) -> Option<&ExtractedFields> {
        match self {
            Self::Success { data } | Self::SuccessWithWarning { data, .. } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::SuccessWithWarning { warning, .. } => Some(warning),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { error } => Some(error),
            _ => None,
        }
    }
}

/// JSON shape consumed by the upload handler:
/// `{ success, data, error?, warning? }`.
#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    data: Option<&'a ExtractedFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<&'a str>,
}

impl Serialize for ProcessingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            success: self.is_success(),
            data: self.data(),
            error: self.error(),
            warning: self.warning(),
        }
        .serialize(serializer)
    }
}
