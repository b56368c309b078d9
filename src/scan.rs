//! Frame sampling pipeline.
//!
//! A producer task walks the frames and sends every Nth one down a bounded
//! channel. The consumer runs recognition and extraction on the blocking
//! pool, one frame at a time, and feeds the outcome to a
//! [`ConfirmationTracker`]. Scanning stops at the first confirmed date;
//! dropping the receiver stops the producer.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::confirm::{ConfirmState, ConfirmationTracker};
use crate::extraction::{DateExtractor, Extraction};
use crate::ocr::{RecognizerType, TextRecognizer};

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp", "pgm"];

/// Errors from the scan pipeline.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Frame task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Failed to list frames in {path}: {source}")]
    ListFrames {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of one sampled frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub index: usize,
    pub path: PathBuf,
    pub extraction: Option<Extraction>,
    pub state: ConfirmState,
}

/// Result of a whole scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub frames_total: usize,
    pub frames_recognized: usize,
    pub frames_failed: usize,
    pub state: ConfirmState,
    /// Most recent extraction of the confirmed date.
    pub confirmed: Option<Extraction>,
}

/// Sorted frame files in `dir` that the recognizer can read.
pub fn list_frames(dir: &Path, recognizer: RecognizerType) -> Result<Vec<PathBuf>, ScanError> {
    let list_err = |source| ScanError::ListFrames {
        path: dir.to_path_buf(),
        source,
    };
    let mut frames = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        let ext = ext.to_lowercase();
        let wanted = match recognizer {
            RecognizerType::Tesseract => IMAGE_EXTENSIONS.contains(&ext.as_str()),
            RecognizerType::Transcript => ext == "txt",
        };
        if wanted && path.is_file() {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Run frames through recognition, extraction and confirmation.
///
/// `on_frame` is called after every sampled frame, in frame order.
pub async fn scan_frames(
    frames: Vec<PathBuf>,
    recognizer: Arc<dyn TextRecognizer>,
    extractor: Arc<DateExtractor>,
    config: &ScanConfig,
    mut on_frame: impl FnMut(&FrameReport),
) -> Result<ScanOutcome, ScanError> {
    let frames_total = frames.len();
    let stride = config.frame_stride.max(1);
    let (tx, mut rx) = mpsc::channel::<(usize, PathBuf)>(config.queue_depth.max(1));

    let producer = tokio::spawn(async move {
        for (index, path) in frames.into_iter().enumerate().step_by(stride) {
            if tx.send((index, path)).await.is_err() {
                debug!(index, "Receiver closed, stopping frame producer");
                break;
            }
        }
    });

    let mut tracker = ConfirmationTracker::new(config.confirmations);
    let mut frames_recognized = 0;
    let mut frames_failed = 0;
    let mut confirmed = None;

    while let Some((index, path)) = rx.recv().await {
        let recognizer = Arc::clone(&recognizer);
        let extractor = Arc::clone(&extractor);
        let frame = path.clone();
        let result = tokio::task::spawn_blocking(move || {
            recognizer
                .recognize(&frame)
                .map(|recognition| extractor.extract(&recognition.candidates()))
        })
        .await?;

        let extraction = match result {
            Ok(extraction) => {
                frames_recognized += 1;
                extraction
            }
            Err(e) => {
                frames_failed += 1;
                warn!(frame = %path.display(), "Recognition failed: {}", e);
                None
            }
        };

        let state = tracker.observe(extraction.as_ref().map(|e| e.date));
        if let (ConfirmState::Confirmed { date }, Some(found)) = (state, extraction.as_ref()) {
            if found.date == date {
                confirmed = Some(found.clone());
            }
        }

        on_frame(&FrameReport {
            index,
            path,
            extraction,
            state,
        });

        if let ConfirmState::Confirmed { date } = state {
            info!(%date, frame = index, "Expiration date confirmed");
            break;
        }
    }

    drop(rx);
    producer.await?;

    Ok(ScanOutcome {
        frames_total,
        frames_recognized,
        frames_failed,
        state: tracker.state(),
        confirmed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionConfig;
    use crate::ocr::TranscriptBackend;

    fn write_frames(dir: &Path, lines: &[&str]) {
        for (i, text) in lines.iter().enumerate() {
            std::fs::write(dir.join(format!("{:04}.txt", i)), text).unwrap();
        }
    }

    fn extractor() -> Arc<DateExtractor> {
        Arc::new(DateExtractor::new(&ExtractionConfig::default()).unwrap())
    }

    #[test]
    fn test_list_frames_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.JPG", "c.txt", "notes"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let images = list_frames(dir.path(), RecognizerType::Tesseract).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.png"]);

        let transcripts = list_frames(dir.path(), RecognizerType::Transcript).unwrap();
        assert_eq!(transcripts.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_confirms_repeated_date() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(
            dir.path(),
            &[
                "blurry ###",
                "EXP 15/11/2027\nLOT 12345",
                "EXP 15/11/2027",
                "EXP 16/11/2027",
            ],
        );
        let frames = list_frames(dir.path(), RecognizerType::Transcript).unwrap();
        let config = ScanConfig {
            frame_stride: 1,
            confirmations: 2,
            ..Default::default()
        };

        let mut seen = Vec::new();
        let outcome = scan_frames(
            frames,
            Arc::new(TranscriptBackend::new()),
            extractor(),
            &config,
            |report| seen.push(report.index),
        )
        .await
        .unwrap();

        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(outcome.frames_total, 4);
        assert_eq!(outcome.frames_recognized, 3);
        let confirmed = outcome.confirmed.unwrap();
        assert_eq!(confirmed.date.to_string(), "2027-11-15");
        assert_eq!(outcome.state.confirmed(), Some(confirmed.date));
    }

    #[tokio::test]
    async fn test_scan_respects_stride() {
        let dir = tempfile::tempdir().unwrap();
        write_frames(dir.path(), &["a", "b", "c", "d", "e"]);
        let frames = list_frames(dir.path(), RecognizerType::Transcript).unwrap();
        let config = ScanConfig {
            frame_stride: 2,
            ..Default::default()
        };

        let mut seen = Vec::new();
        let outcome = scan_frames(
            frames,
            Arc::new(TranscriptBackend::new()),
            extractor(),
            &config,
            |report| seen.push(report.index),
        )
        .await
        .unwrap();

        assert_eq!(seen, vec![0, 2, 4]);
        assert_eq!(outcome.state, ConfirmState::Searching);
        assert!(outcome.confirmed.is_none());
    }

    #[tokio::test]
    async fn test_scan_counts_failed_frames() {
        let dir = tempfile::tempdir().unwrap();
        let frames = vec![dir.path().join("missing.txt")];
        let outcome = scan_frames(
            frames,
            Arc::new(TranscriptBackend::new()),
            extractor(),
            &ScanConfig::default(),
            |_| {},
        )
        .await
        .unwrap();
        assert_eq!(outcome.frames_failed, 1);
        assert_eq!(outcome.frames_recognized, 0);
    }
}
