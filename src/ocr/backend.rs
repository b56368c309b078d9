//! Text recognizer abstraction.
//!
//! A recognizer maps one image frame to the ordered text fragments found on
//! it. The extraction engine only ever sees the fragment strings.

use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from text recognizers.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pixel rectangle of a recognized fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Smallest box containing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let top = self.top.min(other.top);
        let right = self
            .left
            .saturating_add(self.width)
            .max(other.left.saturating_add(other.width));
        let bottom = self
            .top
            .saturating_add(self.height)
            .max(other.top.saturating_add(other.height));
        BoundingBox {
            left,
            top,
            width: right - left,
            height: bottom - top,
        }
    }
}

/// One recognized text fragment (usually a line).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecognizedText {
    pub text: String,
    pub bounds: Option<BoundingBox>,
    /// Confidence score (0.0 - 1.0), if available.
    pub confidence: Option<f32>,
}

impl RecognizedText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bounds: None,
            confidence: None,
        }
    }
}

/// Everything recognized on one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Recognition {
    pub fragments: Vec<RecognizedText>,
    /// Which backend produced this result.
    pub backend: &'static str,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl Recognition {
    pub fn new(fragments: Vec<RecognizedText>, backend: &'static str, start: Instant) -> Self {
        Self {
            fragments,
            backend,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Fragment strings in recognition order, ready for extraction.
    pub fn candidates(&self) -> Vec<&str> {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Trait for text recognizers.
pub trait TextRecognizer: Send + Sync {
    /// Short backend name.
    fn name(&self) -> &'static str;

    /// Check if this backend can run (binaries installed).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Recognize the text fragments on one image frame.
    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError>;
}

/// Configuration for OCR backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language(s), e.g. "eng" or "eng+ind".
    pub language: String,
    /// Tesseract page segmentation mode.
    pub page_segmentation_mode: Option<u32>,
    /// Drop words recognized below this confidence (0-100).
    pub min_word_confidence: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng+ind".to_string(),
            // Sparse text: packaging has scattered short fragments, not paragraphs.
            page_segmentation_mode: Some(11),
            min_word_confidence: 0.0,
        }
    }
}

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    which::which(name).is_ok()
}
