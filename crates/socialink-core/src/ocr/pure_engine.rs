//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.
//!
//! `pure-onnx-ocr` engines keep per-session caches that cannot cross threads,
//! so the engines live on a dedicated worker thread. [`PureOcrEngine`] is a
//! cloneable handle that sends decoded images to that worker.

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use image::{DynamicImage, GenericImageView};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::SocialinkConfig;

use super::{ProgressSink, TextRecognizer};

type Reply = Result<String, ExtractionError>;

/// A decoded image waiting for recognition.
struct Job {
    image: DynamicImage,
    progress: ProgressSink,
    reply: mpsc::Sender<Reply>,
}

/// One recognition engine per language of the hint, sharing the detection model.
struct LanguageEngine {
    language: String,
    engine: pure_onnx_ocr::engine::OcrEngine,
}

/// A recognized line with its axis-aligned position.
struct TextLine {
    text: String,
    left: f32,
    top: f32,
}

/// Owns the engines. Never leaves the worker thread.
struct OcrWorker {
    engines: Vec<LanguageEngine>,
    keep_unk: bool,
}

impl OcrWorker {
    /// Load the engines for every language of the hint.
    ///
    /// The first language of the hint is required; later languages are
    /// skipped with a warning when their model files are missing.
    fn load(model_dir: &Path, config: &SocialinkConfig) -> Result<Self, ExtractionError> {
        let det_path = model_dir.join(&config.models.detection_model);
        if !det_path.exists() {
            return Err(ExtractionError::ModelLoad(format!(
                "detection model not found at {}",
                det_path.display()
            )));
        }

        let mut engines = Vec::new();

        for (index, language) in config.ocr.languages().into_iter().enumerate() {
            let (rec_model, dictionary) =
                config.models.recognition_files(language).ok_or_else(|| {
                    ExtractionError::ModelLoad(format!(
                        "no recognition model configured for language '{}'",
                        language
                    ))
                })?;

            let rec_path = model_dir.join(rec_model);
            let dict_path = model_dir.join(dictionary);

            if !rec_path.exists() || !dict_path.exists() {
                if index == 0 {
                    return Err(ExtractionError::ModelLoad(format!(
                        "recognition model for '{}' not found at {}",
                        language,
                        rec_path.display()
                    )));
                }
                warn!(
                    "Skipping '{}' recognition: model files not found in {}",
                    language,
                    model_dir.display()
                );
                continue;
            }

            let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
                .det_model_path(&det_path)
                .rec_model_path(&rec_path)
                .dictionary_path(&dict_path)
                .build()
                .map_err(|e| ExtractionError::ModelLoad(format!("pure-onnx-ocr ({}): {}", language, e)))?;

            debug!("Loaded '{}' recognizer from {}", language, rec_path.display());

            engines.push(LanguageEngine {
                language: language.to_string(),
                engine,
            });
        }

        if engines.is_empty() {
            return Err(ExtractionError::ModelLoad(format!(
                "no recognition language in '{}'",
                config.ocr.language
            )));
        }

        Ok(Self {
            engines,
            keep_unk: config.ocr.keep_unk,
        })
    }

    fn language(&self) -> String {
        self.engines
            .iter()
            .map(|e| e.language.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }

    /// Answer jobs until every handle is dropped.
    fn serve(self, jobs: mpsc::Receiver<Job>) {
        for job in jobs {
            let result = panic::catch_unwind(AssertUnwindSafe(|| self.process(&job.image, &job.progress)))
                .unwrap_or_else(|_| Err(ExtractionError::Recognition("pure-onnx-ocr panicked".to_string())));
            // The caller may have given up waiting.
            let _ = job.reply.send(result);
        }
        debug!("OCR worker stopped");
    }

    fn process(&self, image: &DynamicImage, progress: &ProgressSink) -> Result<String, ExtractionError> {
        let total = self.engines.len() as f32;
        let mut sections = Vec::with_capacity(self.engines.len());

        for (i, language_engine) in self.engines.iter().enumerate() {
            progress.emit(
                format!("recognizing text ({})", language_engine.language),
                0.2 + 0.7 * (i as f32 / total),
            );

            let results = language_engine
                .engine
                .run_from_image(image)
                .map_err(|e| ExtractionError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

            debug!(
                "pure-onnx-ocr ({}) returned {} text regions",
                language_engine.language,
                results.len()
            );

            let lines = results
                .iter()
                .map(|r| {
                    let (left, top) = top_left(&r.bounding_box);
                    TextLine {
                        text: r.text.clone(),
                        left,
                        top,
                    }
                })
                .collect();

            sections.push(assemble(lines, self.keep_unk));
        }

        Ok(join_sections(sections))
    }
}

/// OCR engine backed by `pure-onnx-ocr` PaddleOCR models.
///
/// Clones share the same worker; recognitions are answered one at a time.
#[derive(Clone)]
pub struct PureOcrEngine {
    jobs: mpsc::Sender<Job>,
    language: String,
}

impl PureOcrEngine {
    /// Create an engine from the model directory named in `config`.
    pub fn from_config(config: &SocialinkConfig) -> Result<Self, ExtractionError> {
        Self::from_dir(&config.models.model_dir, config)
    }

    /// Create an engine from model files in `model_dir`.
    ///
    /// Models are loaded on the worker thread; load errors are returned here.
    pub fn from_dir(model_dir: &Path, config: &SocialinkConfig) -> Result<Self, ExtractionError> {
        let model_dir: PathBuf = model_dir.to_path_buf();
        let config = config.clone();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<String, ExtractionError>>();
        let (jobs, queue) = mpsc::channel::<Job>();

        let worker_dir = model_dir.clone();
        thread::Builder::new()
            .name("pure-onnx-ocr".to_string())
            .spawn(move || match OcrWorker::load(&worker_dir, &config) {
                Ok(worker) => {
                    if ready_tx.send(Ok(worker.language())).is_ok() {
                        worker.serve(queue);
                    }
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            })
            .map_err(|e| ExtractionError::ModelLoad(format!("failed to start OCR worker: {}", e)))?;

        let language = ready_rx.recv().map_err(|_| {
            ExtractionError::ModelLoad("OCR worker exited while loading models".to_string())
        })??;

        info!(
            "Loaded pure-onnx-ocr engine ({}) from {}",
            language,
            model_dir.display()
        );

        Ok(Self { jobs, language })
    }

    /// Recognize an already decoded image.
    ///
    /// Each language's lines are put in reading order; per-language blocks
    /// are concatenated in hint order.
    pub fn process(&self, image: DynamicImage, progress: &ProgressSink) -> Result<String, ExtractionError> {
        let (reply, answer) = mpsc::channel();

        self.jobs
            .send(Job {
                image,
                progress: progress.clone(),
                reply,
            })
            .map_err(|_| ExtractionError::Recognition("OCR worker is not running".to_string()))?;

        answer
            .recv()
            .map_err(|_| ExtractionError::Recognition("OCR worker stopped before answering".to_string()))?
    }
}

impl TextRecognizer for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn recognize(&self, path: &Path, progress: &ProgressSink) -> Result<String, ExtractionError> {
        let start = Instant::now();

        progress.emit("loading image", 0.0);
        let image = image::open(path)
            .map_err(|e| ExtractionError::ImageLoad(format!("{}: {}", path.display(), e)))?;

        let (width, height) = image.dimensions();
        info!("Processing image: {}x{}", width, height);

        let text = self.process(image, progress)?;
        progress.emit("recognition complete", 1.0);

        info!(
            "OCR complete: {} characters in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Top-left corner of the axis-aligned rectangle around a detected polygon.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}

/// Sort lines top-to-bottom, then left-to-right within a row.
fn sort_by_reading_order(lines: &mut [TextLine]) {
    lines.sort_by(|a, b| {
        // Group by approximate vertical position (within 20 pixels)
        let row_a = (a.top / 20.0) as i32;
        let row_b = (b.top / 20.0) as i32;
        if row_a != row_b {
            row_a.cmp(&row_b)
        } else {
            a.left.partial_cmp(&b.left).unwrap_or(std::cmp::Ordering::Equal)
        }
    });
}

/// Turn one language's lines into text: reading order, `[UNK]` replaced with
/// a space unless kept, blank lines dropped.
fn assemble(mut lines: Vec<TextLine>, keep_unk: bool) -> String {
    sort_by_reading_order(&mut lines);

    lines
        .into_iter()
        .map(|l| if keep_unk { l.text } else { l.text.replace("[UNK]", " ") })
        .filter_map(|text| {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate per-language blocks in hint order, skipping empty ones.
fn join_sections(sections: Vec<String>) -> String {
    sections
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
