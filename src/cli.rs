//! Command-line arguments for the lookup demo.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::LogFormat;
use crate::demo::DemoPlan;
use crate::types::SongId;

/// Log output formats accepted on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// song-catalog: song metadata lookups through a caching proxy
#[derive(Parser, Debug)]
#[command(name = "song-catalog")]
#[command(about = "Song metadata lookups through a caching proxy over a slow catalog server")]
#[command(version)]
pub struct Cli {
    /// Song ids to look up, comma-separated
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 3, 4])]
    pub ids: Vec<SongId>,

    /// Title to search for after the id lookups
    #[arg(long, default_value = "Water")]
    pub title: String,

    /// Album to search for after the title search
    #[arg(long, default_value = "Shock Value")]
    pub album: String,

    /// Number of passes over the id lookups (later passes hit the cache)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub repeat: u32,

    /// Simulated server latency in milliseconds
    #[arg(long)]
    pub latency_ms: Option<u64>,

    /// JSON catalog file to use instead of the built-in songs
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print a JSON report instead of text lines
    #[arg(long)]
    pub json: bool,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Log level or directives, e.g. "warn,song_catalog=debug" (RUST_LOG takes precedence)
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Returns the lookups requested on the command line.
    pub fn demo_plan(&self) -> DemoPlan {
        DemoPlan {
            ids: self.ids.clone(),
            title: self.title.clone(),
            album: self.album.clone(),
            repeat: self.repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_sequence() {
        let cli = Cli::parse_from(["song-catalog"]);
        assert_eq!(cli.ids, vec![1, 2, 3, 4]);
        assert_eq!(cli.title, "Water");
        assert_eq!(cli.album, "Shock Value");
        assert_eq!(cli.repeat, 1);
        assert!(!cli.json);
        assert!(cli.latency_ms.is_none());
        assert!(cli.log_format.is_none());

        assert_eq!(cli.demo_plan(), DemoPlan::default());
    }

    #[test]
    fn ids_are_comma_separated() {
        let cli = Cli::parse_from(["song-catalog", "--ids", "5,999,5"]);
        assert_eq!(cli.ids, vec![5, 999, 5]);
    }

    #[test]
    fn repeat_must_be_positive() {
        assert!(Cli::try_parse_from(["song-catalog", "--repeat", "0"]).is_err());
        let cli = Cli::parse_from(["song-catalog", "--repeat", "3"]);
        assert_eq!(cli.demo_plan().repeat, 3);
    }

    #[test]
    fn log_format_values() {
        let cli = Cli::parse_from(["song-catalog", "--log-format", "json"]);
        assert_eq!(cli.log_format, Some(LogFormatArg::Json));
        assert!(Cli::try_parse_from(["song-catalog", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn json_flag_and_search_terms() {
        let cli = Cli::parse_from([
            "song-catalog",
            "--json",
            "--title",
            "Crush",
            "--album",
            "Attacca",
        ]);
        assert!(cli.json);
        let plan = cli.demo_plan();
        assert_eq!(plan.title, "Crush");
        assert_eq!(plan.album, "Attacca");
    }
}
