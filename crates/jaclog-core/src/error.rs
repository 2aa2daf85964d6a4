//! Error types shared by every jaclog crate

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy, split into configuration errors (fail fast, never retried)
/// and I/O errors (propagated to the caller untouched).
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // I/O and Parsing Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    #[error("Unknown severity level: {name:?}")]
    UnknownLevel { name: String },

    #[error("Unsupported destination {spec:?}: {reason}")]
    UnsupportedDestination { spec: String, reason: String },

    #[error("Cannot read modification time of {path}: {source}")]
    Modified {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    pub fn unknown_level(name: impl Into<String>) -> Self {
        Self::UnknownLevel { name: name.into() }
    }

    pub fn unsupported_destination(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedDestination {
            spec: spec.into(),
            reason: reason.into(),
        }
    }

    pub fn modified(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Modified {
            path: path.into(),
            source,
        }
    }

    /// Configuration errors are raised synchronously and never retried.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::ConfigInvalid { .. }
                | Error::UnknownLevel { .. }
                | Error::UnsupportedDestination { .. }
        )
    }

    /// Errors raised while touching a destination.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Modified { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::debug!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::debug!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::unknown_level("fatal");
        assert_eq!(err.to_string(), "Unknown severity level: \"fatal\"");

        let err = Error::config_invalid("symbol_width must be at least 2");
        assert!(err.to_string().contains("symbol_width"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_io());
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_errors_are_classified() {
        assert!(Error::config("already installed").is_config());
        assert!(Error::config_invalid("bad").is_config());
        assert!(Error::unknown_level("loud").is_config());
        assert!(Error::unsupported_destination("", "empty").is_config());
        assert!(!Error::Json(serde_json::from_str::<u8>("x").unwrap_err()).is_config());
    }

    #[test]
    fn test_modified_error_keeps_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::modified("/tmp/app.log", source);
        assert!(err.to_string().contains("/tmp/app.log"));
        assert!(err.is_io());
    }

    #[test]
    fn test_context_passes_error_through() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("opening log file").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
