//! DeltaPoint / Segment - DeltaSegmenter output

use serde::{Deserialize, Serialize};

/// Which driver was faster at a grid point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Driver1,
    Driver2,
    Equal,
}

/// Per-grid-point speed comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaPoint {
    /// Grid index
    pub index: usize,
    /// Grid distance (m)
    pub distance: f64,
    pub speed1: f64,
    pub speed2: f64,
    /// `speed1 - speed2` (km/h)
    pub delta: f64,
    /// Pure function of `delta` and the threshold
    pub winner: Winner,
}

/// Maximal run of grid indices `[start, end)` sharing one winner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub winner: Winner,
    /// Mean delta over the run (km/h)
    pub mean_delta: f64,
}

impl Segment {
    /// Number of grid indices covered
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}
