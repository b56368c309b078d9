//! Text recognition backends.
//!
//! The extraction engine consumes plain strings; these backends produce them
//! from image frames:
//!
//! - **Tesseract**: OCR via the `tesseract` command, lines with bounding boxes
//!   and confidence (default)
//! - **Transcript**: replays recorded OCR output stored as `.txt` files

mod backend;
mod tesseract;
mod transcript;

use serde::{Deserialize, Serialize};

pub use backend::{
    check_binary, BoundingBox, OcrConfig, OcrError, Recognition, RecognizedText, TextRecognizer,
};
pub use tesseract::{parse_tsv, TesseractBackend};
pub use transcript::TranscriptBackend;

/// Available recognizer types.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerType {
    #[default]
    Tesseract,
    Transcript,
}

impl RecognizerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecognizerType::Tesseract => "tesseract",
            RecognizerType::Transcript => "transcript",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tesseract" => Some(RecognizerType::Tesseract),
            "transcript" | "txt" => Some(RecognizerType::Transcript),
            _ => None,
        }
    }

    /// Build the recognizer for this type.
    pub fn build(&self, config: &OcrConfig) -> Box<dyn TextRecognizer> {
        match self {
            RecognizerType::Tesseract => Box::new(TesseractBackend::with_config(config.clone())),
            RecognizerType::Transcript => Box::new(TranscriptBackend::new()),
        }
    }
}

impl std::fmt::Display for RecognizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
