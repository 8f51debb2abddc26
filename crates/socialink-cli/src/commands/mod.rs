//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use socialink_core::{
    ExtractionError, ProgressSink, PureOcrEngine, SocialinkConfig, TextRecognizer,
};

/// `<config dir>/socialink/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("socialink")
        .join("config.json")
}

/// Load the config given with `--config`, else the default file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<SocialinkConfig> {
    if let Some(path) = config_path {
        return Ok(SocialinkConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(SocialinkConfig::from_file(&default_path)?)
    } else {
        Ok(SocialinkConfig::default())
    }
}

/// Stands in for the OCR engine when its models could not be loaded, so that
/// PDFs and unsupported files are still classified.
struct UnavailableRecognizer {
    reason: String,
}

impl TextRecognizer for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn recognize(&self, _path: &Path, _progress: &ProgressSink) -> Result<String, ExtractionError> {
        Err(ExtractionError::Unavailable(self.reason.clone()))
    }
}

/// Load the OCR engine from `model_dir` (or the configured directory).
pub fn load_recognizer(config: &SocialinkConfig, model_dir: Option<&Path>) -> Box<dyn TextRecognizer> {
    let model_dir = model_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.models.model_dir.clone());

    match PureOcrEngine::from_dir(&model_dir, config) {
        Ok(engine) => Box::new(engine),
        Err(e) => {
            warn!("OCR models unavailable: {}", e);
            Box::new(UnavailableRecognizer {
                reason: format!(
                    "{}. Place the PaddleOCR models in {} or pass --model-dir",
                    e,
                    model_dir.display()
                ),
            })
        }
    }
}
