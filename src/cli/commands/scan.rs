//! Frame directory scan command.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use medexp::config::Config;
use medexp::confirm::ConfirmState;
use medexp::ocr::TextRecognizer;
use medexp::scan::{list_frames, scan_frames};

use crate::cli::helpers::{print_report, DateReport};
use crate::cli::icons::{dim_arrow, error, warn};

/// Scan frames until an expiration date is confirmed.
pub async fn cmd_scan(config: &Config, dir: &Path, json: bool) -> anyhow::Result<()> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let recognizer: Arc<dyn TextRecognizer> = Arc::from(config.scan.recognizer.build(&config.ocr));
    if !recognizer.is_available() {
        eprintln!("{} {} is not available", error(), recognizer.name());
        anyhow::bail!("{}", recognizer.availability_hint());
    }
    let extractor = Arc::new(config.extractor()?);

    let frames = list_frames(dir, config.scan.recognizer)?;
    if frames.is_empty() {
        eprintln!(
            "{} No {} frames in {}",
            warn(),
            config.scan.recognizer,
            dir.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(frames.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")?
            .progress_chars("█▓░"),
    );
    if json {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let outcome = scan_frames(frames, recognizer, extractor, &config.scan, |report| {
        pb.set_position(report.index as u64 + 1);
        match report.state {
            ConfirmState::Searching => pb.set_message("searching"),
            ConfirmState::Candidate { date, seen } => pb.set_message(format!(
                "{} seen {}/{}",
                date, seen, config.scan.confirmations
            )),
            ConfirmState::Confirmed { date } => pb.set_message(format!("{} confirmed", date)),
        }
    })
    .await?;
    pb.finish_and_clear();

    let today = Local::now().date_naive();
    let report = outcome
        .confirmed
        .as_ref()
        .map(|e| DateReport::new(e, &config.status, today));

    if json {
        let output = serde_json::json!({
            "frames_total": outcome.frames_total,
            "frames_recognized": outcome.frames_recognized,
            "frames_failed": outcome.frames_failed,
            "state": outcome.state,
            "result": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match outcome.state {
        ConfirmState::Confirmed { .. } => print_report(report.as_ref()),
        ConfirmState::Candidate { date, seen } => {
            println!(
                "{} Not confirmed: last candidate {} seen {} of {} times",
                warn(),
                style(date).bold(),
                seen,
                config.scan.confirmations
            );
        }
        ConfirmState::Searching => print_report(None),
    }
    println!(
        "  {} {} of {} frames recognized, {} failed",
        dim_arrow(),
        outcome.frames_recognized,
        outcome.frames_total,
        outcome.frames_failed
    );
    Ok(())
}
