//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod image;
mod parse;
mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use medexp::ocr::RecognizerType;

use super::helpers::load_config;

#[derive(Parser)]
#[command(name = "medexp")]
#[command(about = "Expiration date extraction for medicine packaging")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true, env = "MEDEXP_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract an expiration date from text fragments (reads stdin lines if none given)
    Parse {
        /// Text fragments, in recognition order
        text: Vec<String>,
        /// Try each fragment on its own instead of as one frame
        #[arg(long)]
        each: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recognize one image and extract its expiration date
    Image {
        /// Image file (or a .txt transcript with --recognizer transcript)
        path: PathBuf,
        /// Recognizer to use (overrides config)
        #[arg(short, long, value_enum)]
        recognizer: Option<RecognizerType>,
        /// Print every recognized fragment
        #[arg(long)]
        fragments: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scan a directory of frames until a date is confirmed
    Scan {
        /// Directory of frames, processed in file name order
        dir: PathBuf,
        /// Recognize every Nth frame (overrides config)
        #[arg(short, long)]
        stride: Option<usize>,
        /// Agreeing frames needed to confirm (overrides config)
        #[arg(short = 'n', long)]
        confirmations: Option<u32>,
        /// Recognizer to use (overrides config)
        #[arg(short, long, value_enum)]
        recognizer: Option<RecognizerType>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Show which config file was loaded
    Path,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Parse { text, each, json } => parse::cmd_parse(&config, text, each, json),
        Commands::Image {
            path,
            recognizer,
            fragments,
            json,
        } => {
            if let Some(recognizer) = recognizer {
                config.scan.recognizer = recognizer;
            }
            image::cmd_image(&config, &path, fragments, json).await
        }
        Commands::Scan {
            dir,
            stride,
            confirmations,
            recognizer,
            json,
        } => {
            if let Some(stride) = stride {
                config.scan.frame_stride = stride;
            }
            if let Some(confirmations) = confirmations {
                config.scan.confirmations = confirmations;
            }
            if let Some(recognizer) = recognizer {
                config.scan.recognizer = recognizer;
            }
            scan::cmd_scan(&config, &dir, json).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
            ConfigCommands::Path => config_cmd::cmd_config_path(&config),
        },
    }
}
