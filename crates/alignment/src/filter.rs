//! Invalid-sample filtering

use contracts::{DistanceRange, DriverId, MapError, RawSample};

/// Linear interpolation needs two knots
pub const MIN_VALID_SAMPLES: usize = 2;

/// One driver's samples after cleaning, sorted by distance
#[derive(Debug, Clone)]
pub struct CleanSeries {
    pub samples: Vec<RawSample>,
    /// Samples received before cleaning
    pub raw_count: usize,
}

impl CleanSeries {
    /// Distance coverage of the kept samples
    pub fn range(&self) -> DistanceRange {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => DistanceRange::new(first.distance, last.distance),
            _ => DistanceRange::new(f64::NAN, f64::NAN),
        }
    }

    #[inline]
    pub fn dropped(&self) -> usize {
        self.raw_count - self.samples.len()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.distance).collect()
    }
}

#[inline]
fn is_valid(sample: &RawSample) -> bool {
    sample.distance.is_finite()
        && sample.x.is_finite()
        && sample.y.is_finite()
        && sample.speed.is_finite()
}

/// Drop samples with a non-finite distance, x, y or speed and sort the rest
/// by distance (stable, so equal distances keep capture order).
///
/// # Errors
/// `EmptyData` when fewer than [`MIN_VALID_SAMPLES`] samples survive.
pub fn clean_samples(driver: &DriverId, raw: &[RawSample]) -> Result<CleanSeries, MapError> {
    let mut samples: Vec<RawSample> = raw.iter().copied().filter(is_valid).collect();

    if samples.len() < MIN_VALID_SAMPLES {
        return Err(MapError::EmptyData {
            driver: driver.clone(),
            valid: samples.len(),
            required: MIN_VALID_SAMPLES,
        });
    }

    samples.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    let series = CleanSeries {
        samples,
        raw_count: raw.len(),
    };

    if series.dropped() > 0 {
        tracing::warn!(
            driver = %driver,
            dropped = series.dropped(),
            kept = series.samples.len(),
            "dropped telemetry samples with non-finite distance, position or speed"
        );
        metrics::counter!("alignment_samples_dropped", "driver" => driver.to_string())
            .increment(series.dropped() as u64);
    }

    Ok(series)
}
