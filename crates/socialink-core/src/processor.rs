//! Document processor: file-type gating, OCR and field extraction.

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result, SocialinkError};
use crate::extraction::FieldExtractor;
use crate::models::document::{ExtractedFields, ProcessingResult};
use crate::ocr::{ProgressSink, TextRecognizer};

/// Image extensions sent to OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Warning returned for PDF uploads, which are accepted but not rasterized.
pub const PDF_WARNING: &str = "PDF OCR requires image conversion. \
     Upload a JPG or PNG scan of the document to pre-fill its details automatically.";

/// Kind of uploaded document, decided from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A raster image OCR can read directly.
    Image,
    /// A PDF; rasterization is not implemented.
    Pdf,
}

impl DocumentKind {
    /// Classify `path` by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            ext if IMAGE_EXTENSIONS.contains(&ext) => Ok(Self::Image),
            "" => Err(SocialinkError::UnsupportedFormat(format!(
                "{} has no extension. Supported formats: {}",
                path.display(),
                supported_formats()
            ))),
            ext => Err(SocialinkError::UnsupportedFormat(format!(
                ".{}. Supported formats: {}",
                ext,
                supported_formats()
            ))),
        }
    }
}

fn supported_formats() -> String {
    let mut formats = IMAGE_EXTENSIONS.to_vec();
    formats.push("pdf");
    formats.join(", ")
}

/// Routes uploaded documents through OCR and field extraction.
///
/// The processor keeps no state between calls; it is `Send + Sync` whenever
/// the recognizer is, so documents may be processed concurrently.
pub struct DocumentProcessor<R> {
    recognizer: R,
    extractor: FieldExtractor,
    progress: ProgressSink,
}

impl<R: TextRecognizer> DocumentProcessor<R> {
    /// Create a processor around an OCR engine.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            extractor: FieldExtractor::new(),
            progress: ProgressSink::none(),
        }
    }

    /// Forward OCR progress events to `progress`.
    pub fn with_progress(mut self, progress: ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    /// Process one document. Every failure is reported as
    /// [`ProcessingResult::Failure`]; this never returns an error.
    pub fn process_document(&self, path: impl AsRef<Path>) -> ProcessingResult {
        let path = path.as_ref();
        let start = Instant::now();

        info!("Processing document: {}", path.display());

        let result = match self.try_process(path) {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to process {}: {}", path.display(), e);
                ProcessingResult::Failure {
                    error: e.to_string(),
                }
            }
        };

        debug!("Processed {} in {:?}", path.display(), start.elapsed());

        result
    }

    fn try_process(&self, path: &Path) -> Result<ProcessingResult> {
        match DocumentKind::from_path(path)? {
            DocumentKind::Pdf => {
                warn!("PDF rasterization is not supported: {}", path.display());
                Ok(ProcessingResult::SuccessWithWarning {
                    warning: PDF_WARNING.to_string(),
                    data: ExtractedFields::empty(),
                })
            }
            DocumentKind::Image => {
                let text = self.recognize(path)?;
                debug!(
                    "{} recognized {} characters ({})",
                    self.recognizer.name(),
                    text.len(),
                    self.recognizer.language()
                );

                Ok(ProcessingResult::Success {
                    data: self.extractor.extract(&text),
                })
            }
        }
    }

    /// Run the recognizer, turning an engine panic into an error.
    fn recognize(&self, path: &Path) -> std::result::Result<String, ExtractionError> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.recognizer.recognize(path, &self.progress)
        }))
        .unwrap_or_else(|payload| {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ExtractionError::Recognition(format!(
                "{} crashed: {}",
                self.recognizer.name(),
                reason
            )))
        })
    }
}
