//! Tesseract OCR backend implementation.
//!
//! Runs the `tesseract` command in TSV mode and groups the recognized words
//! into lines, keeping each line's bounding box and mean confidence.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::debug;

use super::backend::{
    check_binary, BoundingBox, OcrConfig, OcrError, Recognition, RecognizedText, TextRecognizer,
};

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Run Tesseract on an image file, returning raw TSV output.
    fn run_tesseract(&self, image_path: &Path) -> Result<String, OcrError> {
        let mut command = Command::new("tesseract");
        command
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.config.language]);
        if let Some(psm) = self.config.page_segmentation_mode {
            command.args(["--psm", &psm.to_string()]);
        }
        command.arg("tsv");

        match command.output() {
            Ok(output) => {
                if output.status.success() {
                    Ok(String::from_utf8_lossy(&output.stdout).to_string())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!("tesseract failed: {}", stderr)))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::BackendNotAvailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractBackend {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn availability_hint(&self) -> String {
        if !check_binary("tesseract") {
            "Tesseract not installed. Install with: apt install tesseract-ocr tesseract-ocr-ind"
                .to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn recognize(&self, image_path: &Path) -> Result<Recognition, OcrError> {
        let start = Instant::now();
        let tsv = self.run_tesseract(image_path)?;
        let fragments = parse_tsv(&tsv, self.config.min_word_confidence);
        debug!(
            image = %image_path.display(),
            fragments = fragments.len(),
            "Tesseract recognized frame"
        );
        Ok(Recognition::new(fragments, self.name(), start))
    }
}

/// A line being assembled from TSV word rows.
struct LineBuilder {
    key: (u32, u32, u32, u32),
    words: Vec<String>,
    bounds: BoundingBox,
    confidence_sum: f32,
}

impl LineBuilder {
    fn finish(self) -> RecognizedText {
        let count = self.words.len() as f32;
        RecognizedText {
            text: self.words.join(" "),
            bounds: Some(self.bounds),
            confidence: Some(self.confidence_sum / count / 100.0),
        }
    }
}

/// Parse Tesseract TSV output into lines.
///
/// Word rows (level 5) sharing page, block, paragraph and line numbers form
/// one line. Rows are emitted in reading order, so lines keep that order.
pub fn parse_tsv(tsv: &str, min_word_confidence: f32) -> Vec<RecognizedText> {
    let mut lines = Vec::new();
    let mut current: Option<LineBuilder> = None;

    // Header row: level page_num block_num par_num line_num word_num left top width height conf text
    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }
        let text = cols[11..].join("\t");
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        let num = |i: usize| cols[i].trim().parse::<u32>().ok();
        let (Some(page), Some(block), Some(par), Some(line)) = (num(1), num(2), num(3), num(4))
        else {
            continue;
        };
        let (Some(left), Some(top), Some(width), Some(height)) = (num(6), num(7), num(8), num(9))
        else {
            continue;
        };
        let confidence: f32 = cols[10].trim().parse().unwrap_or(-1.0);
        if confidence < min_word_confidence {
            continue;
        }

        let key = (page, block, par, line);
        let bounds = BoundingBox {
            left,
            top,
            width,
            height,
        };
        match current.as_mut() {
            Some(builder) if builder.key == key => {
                builder.words.push(text.to_string());
                builder.bounds = builder.bounds.union(&bounds);
                builder.confidence_sum += confidence.max(0.0);
            }
            _ => {
                if let Some(done) = current.take() {
                    lines.push(done.finish());
                }
                current = Some(LineBuilder {
                    key,
                    words: vec![text.to_string()],
                    bounds,
                    confidence_sum: confidence.max(0.0),
                });
            }
        }
    }

    if let Some(done) = current {
        lines.push(done.finish());
    }
    lines
}
