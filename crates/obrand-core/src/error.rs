//! Error types for branding discovery and message resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },

    // ─────────────────────────────────────────────────────────────
    // Properties Parsing Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Malformed properties at line {line}: {message}")]
    Properties { line: usize, message: String },

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    // ─────────────────────────────────────────────────────────────
    // Theme Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Theme error in {path}: {message}")]
    Theme { path: PathBuf, message: String },

    #[error("Theme metadata not found: {path}")]
    ThemeMetadataNotFound { path: PathBuf },

    #[error("Theme {path} declares version {found}, expected {expected}")]
    ThemeVersionMismatch {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("No message bundle '{base_name}' in {path} for locale '{locale}'")]
    BundleNotFound {
        path: PathBuf,
        base_name: String,
        locale: String,
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

    pub fn properties(line: usize, message: impl Into<String>) -> Self {
        Self::Properties {
            line,
            message: message.into(),
        }
    }

    pub fn theme(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Theme {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn theme_metadata_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ThemeMetadataNotFound { path: path.into() }
    }

    pub fn version_mismatch(path: impl Into<PathBuf>, found: u32, expected: u32) -> Self {
        Self::ThemeVersionMismatch {
            path: path.into(),
            found,
            expected,
        }
    }

    pub fn bundle_not_found(
        path: impl Into<PathBuf>,
        base_name: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self::BundleNotFound {
            path: path.into(),
            base_name: base_name.into(),
            locale: locale.into(),
        }
    }

    /// Check if the error only removes a single theme or bundle from the
    /// result, leaving the rest of the branding usable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Properties { .. }
                | Error::Theme { .. }
                | Error::ThemeMetadataNotFound { .. }
                | Error::ThemeVersionMismatch { .. }
                | Error::BundleNotFound { .. }
                | Error::ConfigInvalid { .. }
        )
    }

    /// Check if the error should stop the command line tool
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::ConfigNotFound { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
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
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
