//! Single image command.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use serde::Serialize;

use medexp::config::Config;
use medexp::ocr::{Recognition, TextRecognizer};

use crate::cli::helpers::{print_report, DateReport};
use crate::cli::icons::{dim_arrow, error};

#[derive(Serialize)]
struct ImageReport<'a> {
    recognition: &'a Recognition,
    result: Option<DateReport<'a>>,
}

/// Recognize one image and extract its expiration date.
pub async fn cmd_image(
    config: &Config,
    path: &Path,
    show_fragments: bool,
    json: bool,
) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let recognizer: Arc<dyn TextRecognizer> = Arc::from(config.scan.recognizer.build(&config.ocr));
    if !recognizer.is_available() {
        eprintln!("{} {} is not available", error(), recognizer.name());
        anyhow::bail!("{}", recognizer.availability_hint());
    }
    let extractor = config.extractor()?;

    let frame = path.to_path_buf();
    let recognition =
        tokio::task::spawn_blocking(move || recognizer.recognize(&frame)).await??;

    let found = extractor.extract(&recognition.candidates());
    let today = Local::now().date_naive();
    let report = found
        .as_ref()
        .map(|e| DateReport::new(e, &config.status, today));

    if json {
        let output = ImageReport {
            recognition: &recognition,
            result: report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if show_fragments {
        for fragment in &recognition.fragments {
            match fragment.confidence {
                Some(confidence) => {
                    println!("{} {:?} ({:.0}%)", dim_arrow(), fragment.text, confidence * 100.0)
                }
                None => println!("{} {:?}", dim_arrow(), fragment.text),
            }
        }
    }
    print_report(report.as_ref());
    println!(
        "  {} {} fragments via {} in {}ms",
        dim_arrow(),
        recognition.fragments.len(),
        recognition.backend,
        recognition.processing_time_ms
    );
    Ok(())
}
