//! # Segmentation
//!
//! DeltaSegmenter: per-grid-point speed delta, winner classification under a
//! strict threshold, and run-length grouping into segments that partition the
//! grid.
//!
//! Also extracts DRS-open zones from an aligned series.

mod segmenter;
mod zones;

pub use segmenter::{DeltaSegmenter, Segmentation};
pub use zones::drs_zones;

pub use contracts::{DeltaPoint, Segment, Winner};
