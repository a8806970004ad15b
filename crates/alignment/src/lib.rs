//! # Alignment
//!
//! TelemetryAligner: resamples two drivers' raw telemetry onto one shared,
//! non-decreasing distance grid.
//!
//! Responsibilities:
//! - Drop samples with non-finite distance / position / speed
//! - Build the distance grid over the configured [`GridDomain`]
//! - Interpolate every channel independently from each driver's own samples
//! - Report dropped samples and grid points clamped beyond a native range
//!
//! ## Usage
//!
//! ```ignore
//! use alignment::TelemetryAligner;
//! use contracts::ComparisonConfig;
//!
//! let aligner = TelemetryAligner::from_config(&ComparisonConfig::default());
//! let pair = aligner.align(&"VER".into(), &ver_samples, &"LEC".into(), &lec_samples)?;
//! assert_eq!(pair.driver1.len(), 500);
//! ```

mod aligner;
mod filter;
mod grid;
mod interp;

pub use aligner::TelemetryAligner;
pub use filter::{clean_samples, CleanSeries, MIN_VALID_SAMPLES};
pub use grid::{grid_span, linspace};

pub use contracts::{AlignedPair, AlignedSample, AlignedSeries, GridDomain, SeriesReport};
