//! Configuration management for medexp using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::{BuildError, DateExtractor, ExtractionConfig};
use crate::ocr::{OcrConfig, RecognizerType};
use crate::status::StatusThresholds;

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid extraction config: {0}")]
    Extraction(#[from] BuildError),
}

/// Frame sampling settings for the scan pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Recognize every Nth frame.
    pub frame_stride: usize,
    /// Consecutive agreeing frames needed to confirm a date.
    pub confirmations: u32,
    /// Which recognizer turns frames into text.
    pub recognizer: RecognizerType,
    /// Frames waiting for recognition before the producer blocks.
    pub queue_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            frame_stride: 3,
            confirmations: 2,
            recognizer: RecognizerType::default(),
            queue_depth: 4,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub status: StatusThresholds,
    pub scan: ScanConfig,
    pub ocr: OcrConfig,
    /// File this config was loaded from, if any.
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers medexp config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("medexp").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            warn!("Ignoring config file {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// Format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse config contents in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        let config: Config = match ext {
            "toml" => toml::from_str(contents)?,
            "yaml" | "yml" => serde_yaml::from_str(contents)?,
            _ => serde_json::from_str(contents)?,
        };
        Ok(config)
    }

    /// Build the extraction engine described by this config.
    pub fn extractor(&self) -> Result<DateExtractor, ConfigError> {
        Ok(DateExtractor::new(&self.extraction)?)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::YearWindow;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scan.frame_stride, 3);
        assert_eq!(config.scan.confirmations, 2);
        assert_eq!(config.status.soon_days, 14);
        assert_eq!(config.status.danger_days, 4);
        assert_eq!(config.ocr.language, "eng+ind");
        assert_eq!(config.extraction.year_window, YearWindow::default());
        assert!(config.extractor().is_ok());
    }

    #[test]
    fn test_parse_toml_partial() {
        let config = Config::parse(
            r#"
            [scan]
            confirmations = 5

            [status]
            soon_days = 30
            "#,
            "toml",
        )
        .unwrap();
        assert_eq!(config.scan.confirmations, 5);
        assert_eq!(config.scan.frame_stride, 3);
        assert_eq!(config.status.soon_days, 30);
        assert_eq!(config.status.danger_days, 4);
    }

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = Config::parse("ocr:\n  language: eng\n", "yml").unwrap();
        assert_eq!(yaml.ocr.language, "eng");

        let json = Config::parse(r#"{"scan": {"recognizer": "transcript"}}"#, "json").unwrap();
        assert_eq!(json.scan.recognizer, RecognizerType::Transcript);
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            Config::parse("[scan\n", "toml"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_unknown_locale_fails_extractor() {
        let config = Config::parse("[extraction]\nlocales = [\"zz\"]\n", "toml").unwrap();
        assert!(matches!(
            config.extractor(),
            Err(ConfigError::Extraction(BuildError::UnknownLocale(_)))
        ));
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let rendered = Config::default().to_toml().unwrap();
        let parsed = Config::parse(&rendered, "toml").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[tokio::test]
    async fn test_load_from_path_records_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medexp.toml");
        std::fs::write(&path, "[scan]\nframe_stride = 1\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.scan.frame_stride, 1);
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_load_from_missing_path() {
        let result = Config::load_from_path(Path::new("/nonexistent/medexp.toml")).await;
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
