//! Tracing subscriber setup.
//!
//! Events go to stderr so stdout stays reserved for lookup results.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};
use crate::error::{CatalogError, ErrorCode, Result};

/// Builds the event filter.
///
/// A valid `RUST_LOG` wins; otherwise the configured level or directive list
/// (e.g. `"info"` or `"warn,song_catalog=debug"`) is used.
pub fn env_filter(config: &LogConfig) -> Result<EnvFilter> {
    let configured = EnvFilter::try_new(config.level.trim()).map_err(|e| {
        CatalogError::with_source(
            ErrorCode::InvalidConfig,
            format!("invalid log level: {}", config.level),
            e,
        )
    })?;

    Ok(EnvFilter::try_from_default_env().unwrap_or(configured))
}

/// Installs the global subscriber.
///
/// Calling this more than once leaves the first subscriber in place.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_accepted() {
        for level in ["trace", "debug", "info", "warn", "error", "off", " INFO "] {
            let config = LogConfig {
                level: level.to_string(),
                format: LogFormat::Pretty,
            };
            assert!(env_filter(&config).is_ok(), "level {level} rejected");
        }
    }

    #[test]
    fn target_directives_accepted() {
        for level in ["song_catalog=debug", "warn,song_catalog::cache=trace"] {
            let config = LogConfig {
                level: level.to_string(),
                format: LogFormat::Pretty,
            };
            assert!(env_filter(&config).is_ok(), "directive {level} rejected");
        }
    }

    #[test]
    fn bad_level_rejected() {
        let config = LogConfig {
            level: "song_catalog=loud".to_string(),
            format: LogFormat::Json,
        };
        let err = env_filter(&config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfig);
        assert!(err.message.contains("loud"));
    }

    #[test]
    fn init_twice_is_harmless() {
        let config = LogConfig::default();
        assert!(init(&config).is_ok());
        assert!(init(&LogConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
        })
        .is_ok());
    }
}
