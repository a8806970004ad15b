//! Layered error definitions
//!
//! Categorized by source: session / alignment / config / io

use std::fmt;

use thiserror::Error;

use crate::{DistanceRange, DriverId, LapSelector};

/// Unified error type
#[derive(Debug, Error)]
pub enum MapError {
    // ===== Session Errors =====
    /// Requested driver is absent from the session's driver list
    #[error("driver '{driver}' not found in session")]
    DriverNotFound { driver: DriverId },

    /// Requested lap has no usable telemetry
    #[error("no telemetry for driver '{driver}' on {lap}: {message}")]
    MissingTelemetry {
        driver: DriverId,
        lap: LapSelector,
        message: String,
    },

    /// Session payload is structurally invalid
    #[error("session format error: {message}")]
    SessionFormat { message: String },

    // ===== Alignment Errors =====
    /// Too few valid samples remain after filtering to interpolate
    #[error("not enough valid telemetry for driver '{driver}': {valid} valid samples, need at least {required}")]
    EmptyData {
        driver: DriverId,
        valid: usize,
        required: usize,
    },

    /// The two drivers' valid distance domains do not overlap
    #[error("distance ranges do not overlap: '{driver1}' covers {range1}, '{driver2}' covers {range2}")]
    InvalidRange {
        driver1: DriverId,
        range1: DistanceRange,
        driver2: DriverId,
        range2: DistanceRange,
    },

    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Hex color string that is not `#rrggbb`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color '{0}'")]
pub struct ParseColorError(pub String);

/// Lap selector that is neither `fastest` nor a lap number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected 'fastest' or a lap number, got '{0}'")]
pub struct ParseLapSelectorError(pub String);

/// Stable error category, for callers choosing between an error message and
/// a partial view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DriverNotFound,
    MissingTelemetry,
    EmptyData,
    InvalidRange,
    Config,
    Session,
    Io,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::DriverNotFound => "driver_not_found",
            ErrorKind::MissingTelemetry => "missing_telemetry",
            ErrorKind::EmptyData => "empty_data",
            ErrorKind::InvalidRange => "invalid_range",
            ErrorKind::Config => "config",
            ErrorKind::Session => "session",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

impl MapError {
    /// Error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            MapError::DriverNotFound { .. } => ErrorKind::DriverNotFound,
            MapError::MissingTelemetry { .. } => ErrorKind::MissingTelemetry,
            MapError::SessionFormat { .. } => ErrorKind::Session,
            MapError::EmptyData { .. } => ErrorKind::EmptyData,
            MapError::InvalidRange { .. } => ErrorKind::InvalidRange,
            MapError::ConfigParse { .. } | MapError::ConfigValidation { .. } => ErrorKind::Config,
            MapError::Io(_) => ErrorKind::Io,
        }
    }

    /// Create driver-not-found error
    pub fn driver_not_found(driver: impl Into<DriverId>) -> Self {
        Self::DriverNotFound {
            driver: driver.into(),
        }
    }

    /// Create missing telemetry error
    pub fn missing_telemetry(
        driver: impl Into<DriverId>,
        lap: LapSelector,
        message: impl Into<String>,
    ) -> Self {
        Self::MissingTelemetry {
            driver: driver.into(),
            lap,
            message: message.into(),
        }
    }

    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create session format error
    pub fn session_format(message: impl Into<String>) -> Self {
        Self::SessionFormat {
            message: message.into(),
        }
    }
}
