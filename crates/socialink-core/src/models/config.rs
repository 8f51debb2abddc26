//! Configuration structures for the document scanning pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SocialinkError};
use crate::ocr::DEFAULT_LANGUAGE;

/// Main configuration for the socialink pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialinkConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Recognition languages joined with `+`, in output order.
    pub language: String,

    /// Keep `[UNK]` tokens emitted for characters missing from the dictionary.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Individual language codes of the hint, e.g. `["fra", "ara"]`.
    pub fn languages(&self) -> Vec<&str> {
        self.language
            .split('+')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name (shared by all languages).
    pub detection_model: String,

    /// Latin-script recognition model used for French.
    pub latin_recognition_model: String,

    /// Character dictionary for the Latin model.
    pub latin_dictionary: String,

    /// Arabic-script recognition model.
    pub arabic_recognition_model: String,

    /// Character dictionary for the Arabic model.
    pub arabic_dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            latin_recognition_model: "latin_rec.onnx".to_string(),
            latin_dictionary: "latin_dict.txt".to_string(),
            arabic_recognition_model: "arabic_rec.onnx".to_string(),
            arabic_dictionary: "arabic_dict.txt".to_string(),
        }
    }
}

impl ModelConfig {
    /// Recognition model and dictionary file names for a language code.
    pub fn recognition_files(&self, language: &str) -> Option<(&str, &str)> {
        match language {
            "fra" | "eng" | "lat" => Some((&self.latin_recognition_model, &self.latin_dictionary)),
            "ara" => Some((&self.arabic_recognition_model, &self.arabic_dictionary)),
            _ => None,
        }
    }
}

impl SocialinkConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SocialinkError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SocialinkError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
