//! Comparison configuration contracts shared across crates.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Rgb;

/// Distance span the shared grid covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridDomain {
    /// `[min(start1, start2), max(end1, end2)]`; points outside one driver's
    /// native range hold that driver's boundary value
    #[default]
    Union,
    /// `[max(start1, start2), min(end1, end2)]`; never extrapolates
    Intersection,
}

/// Tunables of one driver-vs-driver comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Minimum |delta| (km/h) for a grid point to count as a win
    #[validate(range(min = 0.0, message = "must be >= 0"))]
    pub delta_threshold: f64,

    /// Grid resolution
    #[validate(range(min = 1, message = "must be >= 1"))]
    pub num_points: usize,

    /// How far the second teammate's color is blended toward white
    #[validate(range(min = 0.0, max = 1.0, message = "must be within [0, 1]"))]
    pub lighten_factor: f64,

    pub grid_domain: GridDomain,

    /// DRS-open runs shorter than this (m) are not reported as zones
    #[validate(range(min = 0.0, message = "must be >= 0"))]
    pub drs_min_zone_m: f64,

    /// Color of `Equal` segments
    pub neutral_color: Rgb,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            delta_threshold: 0.5,
            num_points: 500,
            lighten_factor: 0.4,
            grid_domain: GridDomain::Union,
            drs_min_zone_m: 100.0,
            neutral_color: Rgb::NEUTRAL,
        }
    }
}
