//! AlignedSeries - TelemetryAligner output
//!
//! Both drivers resampled onto one shared distance grid.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DriverId;

/// Closed distance interval in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub start: f64,
    pub end: f64,
}

impl DistanceRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Interval length (m)
    #[inline]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Whether two closed intervals share at least one point
    #[inline]
    pub fn overlaps(&self, other: &DistanceRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    #[inline]
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.start && distance <= self.end
    }
}

impl fmt::Display for DistanceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.1}, {:.1}] m", self.start, self.end)
    }
}

/// One grid point of one driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedSample {
    /// Grid distance (m), identical across drivers at the same index
    pub distance: f64,
    pub x: f64,
    pub y: f64,
    /// Speed (km/h)
    pub speed: f64,
    pub throttle: Option<f64>,
    pub brake: Option<f64>,
    pub gear: Option<u8>,
    pub drs: Option<u8>,
}

/// One driver's telemetry on the shared grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    pub driver: DriverId,
    pub samples: Vec<AlignedSample>,
}

impl AlignedSeries {
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Speed channel
    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.speed)
    }
}

/// Per-driver diagnostics produced while aligning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesReport {
    pub driver: DriverId,
    /// Samples received from the provider
    pub raw_samples: usize,
    /// Samples kept after dropping non-finite distance/position/speed
    pub valid_samples: usize,
    /// Native distance coverage after filtering
    pub native_range: DistanceRange,
    /// Grid points outside the native range (values held at the boundary)
    pub clamped_points: usize,
}

impl SeriesReport {
    #[inline]
    pub fn dropped_samples(&self) -> usize {
        self.raw_samples - self.valid_samples
    }
}

/// Both drivers aligned on one grid
///
/// Invariant: `driver1.len() == driver2.len() == grid.len()` and
/// `driver{1,2}.samples[i].distance == grid[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub grid: Vec<f64>,
    pub driver1: AlignedSeries,
    pub driver2: AlignedSeries,
    pub reports: [SeriesReport; 2],
}

impl AlignedPair {
    /// Number of grid points
    #[inline]
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Span covered by the grid
    pub fn span(&self) -> Option<DistanceRange> {
        match (self.grid.first(), self.grid.last()) {
            (Some(&start), Some(&end)) => Some(DistanceRange::new(start, end)),
            _ => None,
        }
    }
}
