//! WASM bindings for document field extraction.
//!
//! OCR runs elsewhere (server side or a browser OCR library); these bindings
//! turn its text into the fields used to pre-fill the document form.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use socialink_core::{ExtractedFields, FieldExtractor};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Extract title, institution, issue date and document number from OCR text.
///
/// Returns an object with camelCase keys (`issueDate`, `documentNumber`,
/// `rawText`) and a 0-100 `confidence`. Missing fields are `null`.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&FieldExtractor::new().extract(text))
}

/// Same shape as the JSON envelope's `data`: `null` rather than `undefined`.
fn to_js(fields: &ExtractedFields) -> Result<JsValue, JsValue> {
    fields
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Reusable extractor class for browser use.
#[wasm_bindgen]
pub struct DocumentFieldExtractor {
    extractor: FieldExtractor,
}

#[wasm_bindgen]
impl DocumentFieldExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            extractor: FieldExtractor::new(),
        }
    }

    /// Extract fields from text.
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.extractor.extract(text))
    }

    /// Confidence (0-100) the text would score, without building the object.
    pub fn confidence(&self, text: &str) -> u8 {
        self.extractor.extract(text).confidence()
    }
}

impl Default for DocumentFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence() {
        let extractor = DocumentFieldExtractor::new();
        assert_eq!(extractor.confidence(""), 0);
        assert_eq!(
            extractor.confidence("Diplôme de Licence en Travail Social\nUniversité Mohammed V - Rabat"),
            50
        );
    }

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
