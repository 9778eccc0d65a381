//! Error types for the song catalog.
//!
//! A lookup that finds nothing is not an error: point lookups return `None`
//! and scans return an empty list. The errors here cover catalog loading,
//! configuration, and interruption of the simulated latency.

use std::fmt;

/// Error codes identifying each failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Catalog file could not be read or parsed.
    /// Trigger: Missing file, unreadable file, or malformed JSON.
    CatalogLoadFailed,

    /// Catalog contents violate an invariant.
    /// Trigger: Two records share the same id.
    InvalidCatalog,

    /// Configuration value is out of range.
    /// Trigger: Latency above the maximum, or an unknown log level.
    InvalidConfig,

    /// The simulated server latency was cancelled before it elapsed.
    /// Trigger: A cancel token attached to the delay was fired.
    DelayInterrupted,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::CatalogLoadFailed => "CATALOG_LOAD_FAILED",
            ErrorCode::InvalidCatalog => "INVALID_CATALOG",
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::DelayInterrupted => "DELAY_INTERRUPTED",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::CatalogLoadFailed => "Catalog file could not be read or parsed",
            ErrorCode::InvalidCatalog => "Catalog contains duplicate song ids",
            ErrorCode::InvalidConfig => "Configuration value is out of range",
            ErrorCode::DelayInterrupted => "Simulated server latency was cancelled",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::CatalogLoadFailed => {
                "Check that the catalog path exists and contains a JSON array of songs \
                 with id, title, artist, album and duration_sec fields"
            }
            ErrorCode::InvalidCatalog => "Give every song in the catalog a distinct id",
            ErrorCode::InvalidConfig => {
                "Use a latency between 0 and 60000 ms and a log level of trace, debug, info, \
                 warn, error or off"
            }
            ErrorCode::DelayInterrupted => {
                "No action needed; the lookup completes without the remaining delay"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for catalog operations.
#[derive(Debug)]
pub struct CatalogError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Creates a new CatalogError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new CatalogError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a CATALOG_LOAD_FAILED error.
    pub fn catalog_load_failed(
        path: impl fmt::Display,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(
            ErrorCode::CatalogLoadFailed,
            format!("Failed to load catalog from {}: {}", path, source),
            source,
        )
    }

    /// Creates an INVALID_CATALOG error for a repeated id.
    pub fn duplicate_song_id(id: u32) -> Self {
        Self::new(
            ErrorCode::InvalidCatalog,
            format!("Duplicate song id in catalog: {}", id),
        )
    }

    /// Creates an INVALID_CONFIG error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, reason)
    }

    /// Creates a DELAY_INTERRUPTED error.
    pub fn delay_interrupted(elapsed_ms: u128) -> Self {
        Self::new(
            ErrorCode::DelayInterrupted,
            format!("Simulated latency cancelled after {} ms", elapsed_ms),
        )
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::CatalogLoadFailed.as_str(), "CATALOG_LOAD_FAILED");
        assert_eq!(ErrorCode::InvalidCatalog.as_str(), "INVALID_CATALOG");
        assert_eq!(ErrorCode::InvalidConfig.as_str(), "INVALID_CONFIG");
        assert_eq!(ErrorCode::DelayInterrupted.as_str(), "DELAY_INTERRUPTED");
    }

    #[test]
    fn error_code_hints_and_descriptions_not_empty() {
        for code in [
            ErrorCode::CatalogLoadFailed,
            ErrorCode::InvalidCatalog,
            ErrorCode::InvalidConfig,
            ErrorCode::DelayInterrupted,
        ] {
            assert!(!code.recovery_hint().is_empty());
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::duplicate_song_id(3);
        let text = err.to_string();
        assert!(text.contains("INVALID_CATALOG"));
        assert!(text.contains('3'));
        assert!(text.contains("Recovery:"));
    }

    #[test]
    fn load_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = CatalogError::catalog_load_failed("songs.json", io);
        assert_eq!(err.code, ErrorCode::CatalogLoadFailed);
        assert!(err.message.contains("songs.json"));
        assert!(err.source().is_some());
    }
}
