//! Error types for the socialink-core library.

use thiserror::Error;

/// Main error type for the socialink library.
#[derive(Error, Debug)]
pub enum SocialinkError {
    /// The uploaded file is neither a supported image nor a PDF.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Text acquisition failed.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while acquiring text from a document image.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Failed to load OCR models.
    #[error("failed to load OCR model: {0}")]
    ModelLoad(String),

    /// The image could not be read or decoded.
    #[error("failed to read image: {0}")]
    ImageLoad(String),

    /// The OCR engine failed while recognizing text.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// No OCR engine is available in this build or environment.
    #[error("OCR engine unavailable: {0}")]
    Unavailable(String),
}

/// Result type for the socialink library.
pub type Result<T> = std::result::Result<T, SocialinkError>;
