//! Error types for CLI operations.

use contracts::{ErrorKind, MapError};
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Session file not found
    #[error("Session file not found: {path}")]
    SessionNotFound { path: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Both slots name the same driver
    #[error("Cannot compare {driver} with itself")]
    SameDriver { driver: String },

    /// A telemetry fetch task panicked or was cancelled
    #[error("Telemetry fetch for {driver} did not complete: {message}")]
    FetchAborted { driver: String, message: String },

    /// Pipeline failure, tagged with its kind
    #[error("Comparison failed ({kind}): {source}")]
    Comparison {
        kind: ErrorKind,
        #[source]
        source: MapError,
    },
}

impl CliError {
    pub fn session_not_found(path: impl Into<String>) -> Self {
        Self::SessionNotFound { path: path.into() }
    }

    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn same_driver(driver: impl Into<String>) -> Self {
        Self::SameDriver {
            driver: driver.into(),
        }
    }

    pub fn fetch_aborted(driver: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FetchAborted {
            driver: driver.into(),
            message: message.into(),
        }
    }
}

impl From<MapError> for CliError {
    fn from(source: MapError) -> Self {
        Self::Comparison {
            kind: source.kind(),
            source,
        }
    }
}
