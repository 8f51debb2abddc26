//! Text acquisition from scanned document images.
//!
//! The OCR engine itself is an external dependency. This module defines the
//! [`TextRecognizer`] boundary the processor talks to, plus a progress side
//! channel that callers may observe or ignore.

#[cfg(feature = "native")]
mod pure_engine;

#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ExtractionError;

/// Combined French + Arabic recognition mode.
pub const DEFAULT_LANGUAGE: &str = "fra+ara";

/// Progress notification emitted while recognizing a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    /// Human-readable stage name.
    pub status: String,
    /// Completion between 0.0 and 1.0.
    pub progress: f32,
}

type ProgressFn = dyn Fn(&ProgressEvent) + Send + Sync;

/// Optional observer for [`ProgressEvent`]s. Emitting without a listener is a no-op.
#[derive(Clone, Default)]
pub struct ProgressSink {
    listener: Option<Arc<ProgressFn>>,
}

impl ProgressSink {
    /// A sink that discards every event.
    pub fn none() -> Self {
        Self::default()
    }

    /// A sink forwarding events to `listener`.
    pub fn new(listener: impl Fn(&ProgressEvent) + Send + Sync + 'static) -> Self {
        Self {
            listener: Some(Arc::new(listener)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Notify the listener, if any. `progress` is clamped to 0.0..=1.0.
    pub fn emit(&self, status: impl Into<String>, progress: f32) {
        if let Some(listener) = &self.listener {
            listener(&ProgressEvent {
                status: status.into(),
                progress: progress.clamp(0.0, 1.0),
            });
        }
    }
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSink")
            .field("active", &self.is_active())
            .finish()
    }
}

/// An OCR engine turning a document image into plain text.
///
/// Implementations either return the full recognized text (possibly empty)
/// or an error; they never return partial text on failure.
pub trait TextRecognizer: Send + Sync {
    /// Engine identifier used in logs.
    fn name(&self) -> &'static str;

    /// Language hint the engine recognizes with.
    fn language(&self) -> &str {
        DEFAULT_LANGUAGE
    }

    /// Recognize the text of the image at `path`.
    fn recognize(&self, path: &Path, progress: &ProgressSink) -> Result<String, ExtractionError>;
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn language(&self) -> &str {
        (**self).language()
    }

    fn recognize(&self, path: &Path, progress: &ProgressSink) -> Result<String, ExtractionError> {
        (**self).recognize(path, progress)
    }
}

impl<R: TextRecognizer + ?Sized> TextRecognizer for Arc<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn language(&self) -> &str {
        (**self).language()
    }

    fn recognize(&self, path: &Path, progress: &ProgressSink) -> Result<String, ExtractionError> {
        (**self).recognize(path, progress)
    }
}
