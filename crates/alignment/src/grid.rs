//! Shared distance grid

use contracts::{DistanceRange, GridDomain};

/// Span covered by the grid for two native ranges
pub fn grid_span(domain: GridDomain, range1: DistanceRange, range2: DistanceRange) -> DistanceRange {
    match domain {
        GridDomain::Union => DistanceRange::new(
            range1.start.min(range2.start),
            range1.end.max(range2.end),
        ),
        GridDomain::Intersection => DistanceRange::new(
            range1.start.max(range2.start),
            range1.end.min(range2.end),
        ),
    }
}

/// `n` evenly spaced values from `span.start` to `span.end` inclusive.
///
/// The last value is exactly `span.end`; `n == 1` yields `[span.start]`.
pub fn linspace(span: DistanceRange, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![span.start],
        _ => {
            let step = span.length() / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n)
                .map(|i| (span.start + i as f64 * step).min(span.end))
                .collect();
            grid[n - 1] = span.end;
            grid
        }
    }
}
