//! Replays recorded OCR output.
//!
//! Reads a plain text file next to each frame and treats every non-empty line
//! as one recognized fragment. Used to re-run extraction over captured
//! sessions without invoking an OCR engine.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::backend::{OcrError, Recognition, RecognizedText, TextRecognizer};

/// Transcript-replay backend.
#[derive(Debug, Clone, Default)]
pub struct TranscriptBackend;

impl TranscriptBackend {
    pub fn new() -> Self {
        Self
    }

    /// Transcript for a frame: the frame itself if it is a `.txt` file,
    /// otherwise the same path with a `.txt` extension.
    pub fn transcript_path(frame: &Path) -> PathBuf {
        if frame.extension().is_some_and(|ext| ext == "txt") {
            frame.to_path_buf()
        } else {
            frame.with_extension("txt")
        }
    }
}

impl TextRecognizer for TranscriptBackend {
    fn name(&self) -> &'static str {
        "transcript"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn availability_hint(&self) -> String {
        "Transcript replay is always available".to_string()
    }

    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError> {
        let start = Instant::now();
        let path = Self::transcript_path(image_path);
        let contents = std::fs::read_to_string(&path)?;
        let fragments = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RecognizedText::plain)
            .collect();
        Ok(Recognition::new(fragments, self.name(), start))
    }
}
