//! TelemetryAligner implementation.

use contracts::{
    AlignedPair, AlignedSample, AlignedSeries, ComparisonConfig, DistanceRange, DriverId,
    GridDomain, MapError, RawSample, SeriesReport,
};
use tracing::instrument;

use crate::filter::{clean_samples, CleanSeries};
use crate::grid::{grid_span, linspace};
use crate::interp::{linear, linear_optional, nearest};

/// Resamples two drivers onto one distance grid
///
/// Stateless apart from its settings; `align` is a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryAligner {
    num_points: usize,
    domain: GridDomain,
}

impl Default for TelemetryAligner {
    fn default() -> Self {
        Self::from_config(&ComparisonConfig::default())
    }
}

impl TelemetryAligner {
    pub fn new(num_points: usize, domain: GridDomain) -> Self {
        Self { num_points, domain }
    }

    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(config.num_points, config.grid_domain)
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    pub fn domain(&self) -> GridDomain {
        self.domain
    }

    /// Align two raw telemetry series
    ///
    /// # Errors
    /// - `EmptyData` if either driver keeps fewer than two valid samples, or
    ///   the grid would have no points
    /// - `InvalidRange` if the two valid distance ranges do not overlap
    #[instrument(
        level = "debug",
        name = "telemetry_align",
        skip(self, raw1, raw2),
        fields(driver1 = %driver1, driver2 = %driver2, num_points = self.num_points)
    )]
    pub fn align(
        &self,
        driver1: &DriverId,
        raw1: &[RawSample],
        driver2: &DriverId,
        raw2: &[RawSample],
    ) -> Result<AlignedPair, MapError> {
        if self.num_points == 0 {
            return Err(MapError::EmptyData {
                driver: driver1.clone(),
                valid: 0,
                required: 1,
            });
        }

        let clean1 = clean_samples(driver1, raw1)?;
        let clean2 = clean_samples(driver2, raw2)?;

        let (range1, range2) = (clean1.range(), clean2.range());
        if !range1.overlaps(&range2) {
            return Err(MapError::InvalidRange {
                driver1: driver1.clone(),
                range1,
                driver2: driver2.clone(),
                range2,
            });
        }

        let span = grid_span(self.domain, range1, range2);
        let grid = linspace(span, self.num_points);

        let series1 = resample(driver1, &clean1, &grid);
        let series2 = resample(driver2, &clean2, &grid);
        let report1 = report(driver1, &clean1, &grid, span);
        let report2 = report(driver2, &clean2, &grid, span);

        tracing::debug!(
            span = %span,
            clamped1 = report1.clamped_points,
            clamped2 = report2.clamped_points,
            "telemetry aligned"
        );

        Ok(AlignedPair {
            grid,
            driver1: series1,
            driver2: series2,
            reports: [report1, report2],
        })
    }
}

/// Interpolate every channel of one driver at the grid distances
fn resample(driver: &DriverId, clean: &CleanSeries, grid: &[f64]) -> AlignedSeries {
    let samples = &clean.samples;
    let distances = clean.distances();
    let channel = |f: fn(&RawSample) -> f64| -> Vec<f64> {
        let values: Vec<f64> = samples.iter().map(f).collect();
        linear(&distances, &values, grid)
    };

    let x = channel(|s| s.x);
    let y = channel(|s| s.y);
    let speed = channel(|s| s.speed);
    let throttle = linear_optional(&distances, samples.iter().map(|s| s.throttle), grid);
    let brake = linear_optional(&distances, samples.iter().map(|s| s.brake), grid);
    let gear = nearest(&distances, samples.iter().map(|s| s.gear), grid);
    let drs = nearest(&distances, samples.iter().map(|s| s.drs), grid);

    let samples = grid
        .iter()
        .enumerate()
        .map(|(i, &distance)| AlignedSample {
            distance,
            x: x[i],
            y: y[i],
            speed: speed[i],
            throttle: throttle[i],
            brake: brake[i],
            gear: gear[i],
            drs: drs[i],
        })
        .collect();

    AlignedSeries {
        driver: driver.clone(),
        samples,
    }
}

fn report(
    driver: &DriverId,
    clean: &CleanSeries,
    grid: &[f64],
    span: DistanceRange,
) -> SeriesReport {
    let native_range = clean.range();
    let clamped_points = grid.iter().filter(|&&d| !native_range.contains(d)).count();

    if clamped_points > 0 {
        tracing::warn!(
            driver = %driver,
            clamped_points,
            native_range = %native_range,
            grid_span = %span,
            "grid extends beyond driver's telemetry; values held at boundary"
        );
        metrics::counter!("alignment_clamped_points", "driver" => driver.to_string())
            .increment(clamped_points as u64);
    }

    SeriesReport {
        driver: driver.clone(),
        raw_samples: clean.raw_count,
        valid_samples: clean.samples.len(),
        native_range,
        clamped_points,
    }
}
