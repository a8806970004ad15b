//! Per-channel resampling onto the grid
//!
//! Knots are sorted by distance and the grid is non-decreasing, so a single
//! forward cursor brackets every target.

/// Bracketing knots of one grid target
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket {
    lower: usize,
    upper: usize,
    /// Position between `lower` and `upper`, clamped to [0, 1]
    frac: f64,
}

/// Forward cursor over sorted knot distances
struct Cursor<'a> {
    knots: &'a [f64],
    idx: usize,
}

impl<'a> Cursor<'a> {
    fn new(knots: &'a [f64]) -> Self {
        Self { knots, idx: 0 }
    }

    /// Targets must be passed in non-decreasing order
    fn locate(&mut self, target: f64) -> Bracket {
        let knots = self.knots;
        while self.idx + 1 < knots.len() && knots[self.idx + 1] < target {
            self.idx += 1;
        }
        let lower = self.idx;
        if lower + 1 < knots.len() {
            let (d0, d1) = (knots[lower], knots[lower + 1]);
            let frac = if (d1 - d0).abs() > f64::EPSILON {
                ((target - d0) / (d1 - d0)).clamp(0.0, 1.0)
            } else {
                0.0
            };
            Bracket {
                lower,
                upper: lower + 1,
                frac,
            }
        } else {
            Bracket {
                lower,
                upper: lower,
                frac: 0.0,
            }
        }
    }
}

/// Linear interpolation; targets outside the knot range hold the boundary value.
///
/// `knots` and `values` must have equal, non-zero length.
pub(crate) fn linear(knots: &[f64], values: &[f64], grid: &[f64]) -> Vec<f64> {
    debug_assert_eq!(knots.len(), values.len());
    if knots.is_empty() {
        return vec![f64::NAN; grid.len()];
    }
    let mut cursor = Cursor::new(knots);
    grid.iter()
        .map(|&target| {
            let b = cursor.locate(target);
            let (v0, v1) = (values[b.lower], values[b.upper]);
            v0 + (v1 - v0) * b.frac
        })
        .collect()
}

/// Linear interpolation of a channel that may be absent or NaN per sample.
///
/// Only finite readings act as knots. With no finite reading at all the
/// channel is unavailable along the whole grid.
pub(crate) fn linear_optional(
    distances: &[f64],
    values: impl Iterator<Item = Option<f64>>,
    grid: &[f64],
) -> Vec<Option<f64>> {
    let (knots, readings): (Vec<f64>, Vec<f64>) = distances
        .iter()
        .zip(values)
        .filter_map(|(&d, v)| v.filter(|v| v.is_finite()).map(|v| (d, v)))
        .unzip();
    if knots.is_empty() {
        return vec![None; grid.len()];
    }
    linear(&knots, &readings, grid).into_iter().map(Some).collect()
}

/// Nearest-knot resampling for discrete channels (gear, DRS code).
///
/// Equidistant targets take the earlier knot.
pub(crate) fn nearest<T: Copy>(
    distances: &[f64],
    values: impl Iterator<Item = Option<T>>,
    grid: &[f64],
) -> Vec<Option<T>> {
    let (knots, readings): (Vec<f64>, Vec<T>) = distances
        .iter()
        .zip(values)
        .filter_map(|(&d, v)| v.map(|v| (d, v)))
        .unzip();
    if knots.is_empty() {
        return vec![None; grid.len()];
    }
    let mut cursor = Cursor::new(&knots);
    grid.iter()
        .map(|&target| {
            let b = cursor.locate(target);
            let idx = if b.frac > 0.5 { b.upper } else { b.lower };
            Some(readings[idx])
        })
        .collect()
}
