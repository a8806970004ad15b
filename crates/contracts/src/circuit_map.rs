//! CircuitMap - CircuitMapAssembler output
//!
//! In-memory renderable structure handed to a plotting layer.

use serde::{Deserialize, Serialize};

use crate::{
    ColorPair, DeltaPoint, DistanceRange, DriverId, HoverRecord, LapSelector, Rgb, SeriesReport,
    Winner,
};

/// Track coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub x: f64,
    pub y: f64,
}

/// Colored polyline for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSegment {
    /// First grid index (inclusive)
    pub start: usize,
    /// Last grid index (exclusive)
    pub end: usize,
    pub winner: Winner,
    pub color: Rgb,
    /// Mean speed delta over the segment (km/h)
    pub mean_delta: f64,
    /// Grid coordinates `start..=end` (clipped to the grid) so consecutive
    /// polylines share their boundary point
    pub points: Vec<TrackPoint>,
}

/// Legend row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub winner: Winner,
}

/// DRS-open stretches of each driver
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrsZones {
    pub driver1: Vec<DistanceRange>,
    pub driver2: Vec<DistanceRange>,
}

/// Renderable comparison of two drivers around the circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitMap {
    pub title: String,
    pub driver1: DriverId,
    pub driver2: DriverId,
    pub lap: LapSelector,
    /// Distance span of the shared grid
    pub span: DistanceRange,
    pub num_points: usize,
    pub delta_threshold: f64,
    pub colors: ColorPair,
    /// Ordered by `start`, partitioning `[0, num_points)`
    pub segments: Vec<MapSegment>,
    /// Speed delta at every grid index
    pub deltas: Vec<DeltaPoint>,
    /// One record per grid index
    pub hover: Vec<HoverRecord>,
    pub legend: Vec<LegendEntry>,
    pub drs_zones: DrsZones,
    /// Alignment diagnostics per driver
    pub reports: [SeriesReport; 2],
}

impl CircuitMap {
    /// Share of grid points won by each side: (driver1, driver2, equal)
    pub fn winner_shares(&self) -> (f64, f64, f64) {
        if self.num_points == 0 {
            return (0.0, 0.0, 0.0);
        }
        let mut counts = [0usize; 3];
        for segment in &self.segments {
            let slot = match segment.winner {
                Winner::Driver1 => 0,
                Winner::Driver2 => 1,
                Winner::Equal => 2,
            };
            counts[slot] += segment.end - segment.start;
        }
        let total = self.num_points as f64;
        (
            counts[0] as f64 / total,
            counts[1] as f64 / total,
            counts[2] as f64 / total,
        )
    }
}
