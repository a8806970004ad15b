//! # Observability
//!
//! Tracing subscriber setup and comparison statistics.
//!
//! ## Features
//!
//! - Tracing initialization (JSON/Pretty/Compact, `RUST_LOG` aware)
//! - `metrics` facade recorders for assembled maps
//! - Delta statistics aggregation with a printable summary
//!
//! ## Usage
//!
//! ```ignore
//! use observability::{DeltaStatsAggregator, ObservabilityConfig};
//!
//! observability::init_with_config(ObservabilityConfig::default())?;
//!
//! let map = assembler.assemble_from_session(..)?;
//! observability::record_map_metrics(&map);
//! println!("{}", DeltaStatsAggregator::from_map(&map).summary());
//! ```

pub mod metrics;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub use crate::metrics::{
    record_alignment_report, record_map_metrics, DeltaStatsAggregator, DeltaSummary,
    RunningStats, StatsSummary,
};

/// Initialize tracing with the default configuration
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,
    /// Used when `RUST_LOG` is unset
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            default_log_level: "info".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Level from a `-v` count, or `warn` when quiet
    pub fn with_verbosity(mut self, verbose: u8, quiet: bool) -> Self {
        self.default_log_level = if quiet {
            "warn"
        } else {
            match verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
        .to_string();
        self
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable multi-line
    Pretty,
    /// Single line per event
    #[default]
    Compact,
}

/// Install the global tracing subscriber
///
/// Logs go to stderr so stdout stays free for map output.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_writer(std::io::stderr).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_writer(std::io::stderr).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    tracing::debug!(
        log_format = ?config.log_format,
        level = %config.default_log_level,
        "Observability initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.default_log_level, "info");
    }

    #[test]
    fn test_verbosity_levels() {
        let level = |v, q| ObservabilityConfig::default().with_verbosity(v, q).default_log_level;
        assert_eq!(level(0, false), "info");
        assert_eq!(level(1, false), "debug");
        assert_eq!(level(3, false), "trace");
        assert_eq!(level(2, true), "warn");
    }
}
