//! Core library for SociaLink document scanning.
//!
//! This crate provides:
//! - An OCR adapter turning uploaded diploma/certificate scans into text
//! - Rule-based field extraction (title, institution, issue date, document number)
//! - A document processor returning a uniform result envelope for upload handlers

pub mod error;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod processor;

pub use error::{ExtractionError, Result, SocialinkError};
pub use extraction::FieldExtractor;
pub use models::config::SocialinkConfig;
pub use models::document::{ExtractedFields, ProcessingResult};
pub use ocr::{ProgressEvent, ProgressSink, TextRecognizer, DEFAULT_LANGUAGE};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use processor::{DocumentKind, DocumentProcessor};
