//! Text parsing command.

use std::io::{BufRead, IsTerminal};

use chrono::Local;
use tracing::debug;

use medexp::config::Config;
use medexp::Extraction;

use crate::cli::helpers::{print_report, DateReport};
use crate::cli::icons::dim_arrow;

/// Extract a date from fragments given on the command line or stdin.
pub fn cmd_parse(config: &Config, text: Vec<String>, each: bool, json: bool) -> anyhow::Result<()> {
    let candidates = if text.is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            anyhow::bail!("No text given. Pass fragments as arguments or pipe them on stdin.");
        }
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        text
    };
    debug!(count = candidates.len(), "Parsing candidates");

    let extractor = config.extractor()?;
    let today = Local::now().date_naive();

    if each {
        let results: Vec<(String, Option<Extraction>)> = candidates
            .into_iter()
            .map(|candidate| {
                let found = extractor.try_parse(&candidate);
                (candidate, found)
            })
            .collect();

        if json {
            let reports: Vec<_> = results
                .iter()
                .map(|(candidate, found)| {
                    serde_json::json!({
                        "candidate": candidate,
                        "result": found
                            .as_ref()
                            .map(|e| DateReport::new(e, &config.status, today)),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            for (candidate, found) in &results {
                println!("{} {:?}", dim_arrow(), candidate);
                let report = found
                    .as_ref()
                    .map(|e| DateReport::new(e, &config.status, today));
                print_report(report.as_ref());
            }
        }
        return Ok(());
    }

    let found = extractor.extract(&candidates);
    let report = found
        .as_ref()
        .map(|e| DateReport::new(e, &config.status, today));
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(report.as_ref());
    }
    Ok(())
}
