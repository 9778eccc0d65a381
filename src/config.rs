//! Runtime configuration.
//!
//! Holds the simulated server latency, an optional catalog file, and the
//! logging settings. Values come from defaults, then environment variables,
//! then command-line flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{CatalogError, Result};

/// Default simulated server latency in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 1000;

/// Largest accepted simulated latency in milliseconds.
pub const MAX_LATENCY_MS: u64 = 60_000;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Returns the string representation of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }

    /// Parses a format from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level or directive list, e.g. "info" or "warn,song_catalog=debug".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Runtime configuration for the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Simulated latency of every server lookup, in milliseconds.
    pub latency_ms: u64,

    /// JSON catalog file to load instead of the built-in songs.
    pub catalog_path: Option<PathBuf>,

    /// Logging settings.
    pub log: LogConfig,
}

impl CatalogConfig {
    /// Creates a CatalogConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a CatalogConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `SONG_CATALOG_LATENCY_MS` - Simulated server latency
    /// - `SONG_CATALOG_PATH` - JSON catalog file
    /// - `SONG_CATALOG_LOG_LEVEL` - Default log level
    /// - `SONG_CATALOG_LOG_FORMAT` - Log format (pretty, json)
    ///
    /// Falls back to defaults for unset or unparsable variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(latency) = std::env::var("SONG_CATALOG_LATENCY_MS") {
            if let Ok(latency) = latency.parse::<u64>() {
                config.latency_ms = latency;
            }
        }

        if let Ok(path) = std::env::var("SONG_CATALOG_PATH") {
            if !path.is_empty() {
                config.catalog_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(level) = std::env::var("SONG_CATALOG_LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.log.level = level;
            }
        }

        if let Ok(format) = std::env::var("SONG_CATALOG_LOG_FORMAT") {
            if let Some(format) = LogFormat::parse(&format) {
                config.log.format = format;
            }
        }

        config
    }

    /// Overrides values with those given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(latency) = cli.latency_ms {
            self.latency_ms = latency;
        }
        if let Some(ref path) = cli.catalog {
            self.catalog_path = Some(path.clone());
        }
        if let Some(ref level) = cli.log_level {
            self.log.level = level.clone();
        }
        if let Some(format) = cli.log_format {
            self.log.format = format.into();
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.latency_ms > MAX_LATENCY_MS {
            return Err(CatalogError::invalid_config(format!(
                "latency too high: {} ms (max {})",
                self.latency_ms, MAX_LATENCY_MS
            )));
        }

        if self.log.level.trim().is_empty() {
            return Err(CatalogError::invalid_config("log level cannot be empty"));
        }

        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            catalog_path: None,
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::LogFormatArg;
    use clap::Parser;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("TEXT"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse("Json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse("xml"), None);
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn defaults() {
        let config = CatalogConfig::new();
        assert_eq!(config.latency_ms, 1000);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.format, LogFormat::Pretty);
    }

    #[test]
    fn config_validation() {
        let mut config = CatalogConfig::new();
        assert!(config.validate().is_ok());

        config.latency_ms = 0;
        assert!(config.validate().is_ok());

        config.latency_ms = MAX_LATENCY_MS + 1;
        assert!(config.validate().is_err());

        config.latency_ms = 10;
        config.log.level = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from([
            "song-catalog",
            "--latency-ms",
            "5",
            "--catalog",
            "songs.json",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ]);
        let mut config = CatalogConfig::new();
        config.apply_cli(&cli);

        assert_eq!(config.latency_ms, 5);
        assert_eq!(config.catalog_path, Some(PathBuf::from("songs.json")));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn absent_cli_flags_keep_config() {
        let cli = Cli::parse_from(["song-catalog"]);
        let mut config = CatalogConfig::new();
        config.latency_ms = 250;
        config.apply_cli(&cli);
        assert_eq!(config.latency_ms, 250);
        assert_eq!(LogFormat::from(LogFormatArg::Pretty), LogFormat::Pretty);
    }

    #[test]
    fn config_serializes() {
        let json = serde_json::to_string(&CatalogConfig::new()).unwrap();
        assert!(json.contains("\"latency_ms\":1000"));
        assert!(json.contains("\"format\":\"pretty\""));
    }
}
