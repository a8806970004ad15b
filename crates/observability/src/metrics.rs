//! Comparison metrics
//!
//! `metrics` facade recorders for assembled maps, plus an in-memory
//! aggregator for printable delta statistics.

use std::fmt;

use contracts::{CircuitMap, DeltaPoint, SeriesReport, Winner};
use metrics::{counter, gauge, histogram};

/// Record facade metrics for one assembled map
///
/// # Example
///
/// ```ignore
/// let map = assembler.assemble(&d1, &d2, lap, &lookup)?;
/// observability::metrics::record_map_metrics(&map);
/// ```
pub fn record_map_metrics(map: &CircuitMap) {
    gauge!("circuit_map_grid_points").set(map.num_points as f64);
    histogram!("circuit_map_span_m").record(map.span.length());

    let (share1, share2, equal) = map.winner_shares();
    gauge!("circuit_map_winner_share", "winner" => "driver1").set(share1);
    gauge!("circuit_map_winner_share", "winner" => "driver2").set(share2);
    gauge!("circuit_map_winner_share", "winner" => "equal").set(equal);

    for segment in &map.segments {
        histogram!("circuit_map_segment_points").record((segment.end - segment.start) as f64);
    }

    for report in &map.reports {
        record_alignment_report(report);
    }
}

/// Record one driver's alignment diagnostics
pub fn record_alignment_report(report: &SeriesReport) {
    let driver = report.driver.to_string();
    if report.dropped_samples() > 0 {
        counter!("circuit_map_samples_dropped_total", "driver" => driver.clone())
            .increment(report.dropped_samples() as u64);
    }
    gauge!("circuit_map_clamped_points", "driver" => driver).set(report.clamped_points as f64);
}

/// Delta statistics over one or more maps
#[derive(Debug, Clone, Default)]
pub struct DeltaStatsAggregator {
    /// Maps folded in
    pub maps: u64,

    /// Segments across all maps
    pub segments: u64,

    /// Signed speed delta (km/h)
    pub delta_stats: RunningStats,

    /// Absolute speed delta (km/h)
    pub abs_delta_stats: RunningStats,

    /// Grid points per winner: driver1, driver2, equal
    pub wins: [u64; 3],

    labels: Option<(String, String)>,
}

impl DeltaStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator seeded with a single map
    pub fn from_map(map: &CircuitMap) -> Self {
        let mut aggregator = Self::new();
        aggregator.update(map);
        aggregator
    }

    /// Fold in an assembled map
    ///
    /// Labels come from the first map seen.
    pub fn update(&mut self, map: &CircuitMap) {
        self.maps += 1;
        self.segments += map.segments.len() as u64;
        if self.labels.is_none() {
            self.labels = Some((map.driver1.to_string(), map.driver2.to_string()));
        }
        self.update_points(&map.deltas);
    }

    /// Fold in raw delta points
    pub fn update_points(&mut self, points: &[DeltaPoint]) {
        for point in points {
            self.delta_stats.push(point.delta);
            self.abs_delta_stats.push(point.delta.abs());
            let slot = match point.winner {
                Winner::Driver1 => 0,
                Winner::Driver2 => 1,
                Winner::Equal => 2,
            };
            self.wins[slot] += 1;
        }
    }

    pub fn summary(&self) -> DeltaSummary {
        let (driver1, driver2) = self
            .labels
            .clone()
            .unwrap_or_else(|| ("driver1".to_string(), "driver2".to_string()));
        let total = self.delta_stats.count();
        let share = |count: u64| {
            if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        };
        DeltaSummary {
            driver1,
            driver2,
            maps: self.maps,
            points: total,
            segments: self.segments,
            delta_kmh: StatsSummary::from(&self.delta_stats),
            abs_delta_kmh: StatsSummary::from(&self.abs_delta_stats),
            wins: self.wins,
            win_rates: [share(self.wins[0]), share(self.wins[1]), share(self.wins[2])],
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Printable delta statistics
#[derive(Debug, Clone, Default)]
pub struct DeltaSummary {
    pub driver1: String,
    pub driver2: String,
    pub maps: u64,
    pub points: u64,
    pub segments: u64,
    pub delta_kmh: StatsSummary,
    pub abs_delta_kmh: StatsSummary,
    pub wins: [u64; 3],
    /// Percent of grid points per winner
    pub win_rates: [f64; 3],
}

impl fmt::Display for DeltaSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Delta Summary: {} vs {} ===", self.driver1, self.driver2)?;
        if self.maps > 1 {
            writeln!(f, "Maps: {}", self.maps)?;
        }
        writeln!(f, "Grid points: {}", self.points)?;
        writeln!(f, "Segments: {}", self.segments)?;
        writeln!(f, "Delta (km/h): {}", self.delta_kmh)?;
        writeln!(f, "|Delta| (km/h): {}", self.abs_delta_kmh)?;
        writeln!(
            f,
            "{} faster: {} ({:.1}%)",
            self.driver1, self.wins[0], self.win_rates[0]
        )?;
        writeln!(
            f,
            "{} faster: {} ({:.1}%)",
            self.driver2, self.wins[1], self.win_rates[1]
        )?;
        writeln!(f, "Equal pace: {} ({:.1}%)", self.wins[2], self.win_rates[2])
    }
}

/// Statistics snapshot
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count,
            min: stats.min,
            max: stats.max,
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.2}, max={:.2}, mean={:.2}, std={:.2} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// Online statistics (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}
