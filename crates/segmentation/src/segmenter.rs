//! DeltaSegmenter implementation.

use contracts::{AlignedPair, ComparisonConfig, DeltaPoint, Segment, Winner};
use tracing::instrument;

/// Delta points of a comparison and their run-length grouping
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub points: Vec<DeltaPoint>,
    /// Ordered by `start`, partitioning `[0, points.len())`
    pub segments: Vec<Segment>,
}

/// Classifies grid points by speed delta and groups equal winners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaSegmenter {
    threshold: f64,
}

impl Default for DeltaSegmenter {
    fn default() -> Self {
        Self::from_config(&ComparisonConfig::default())
    }
}

impl DeltaSegmenter {
    /// `threshold` is the half-width (km/h) of the band classified `Equal`
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(config.delta_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Winner for one delta; both band edges count as `Equal`
    #[inline]
    pub fn classify(&self, delta: f64) -> Winner {
        if delta > self.threshold {
            Winner::Driver1
        } else if delta < -self.threshold {
            Winner::Driver2
        } else {
            Winner::Equal
        }
    }

    /// `speed1 - speed2` and its winner at every grid index
    ///
    /// A one-point grid has no stretch to win, so its only point is `Equal`.
    pub fn delta_points(&self, pair: &AlignedPair) -> Vec<DeltaPoint> {
        let single = pair.len() == 1;
        pair.driver1
            .samples
            .iter()
            .zip(&pair.driver2.samples)
            .enumerate()
            .map(|(index, (s1, s2))| {
                let delta = s1.speed - s2.speed;
                DeltaPoint {
                    index,
                    distance: s1.distance,
                    speed1: s1.speed,
                    speed2: s2.speed,
                    delta,
                    winner: if single { Winner::Equal } else { self.classify(delta) },
                }
            })
            .collect()
    }

    /// Group consecutive points sharing a winner.
    ///
    /// A single point forms one `Equal` segment `[0, 1)`; no points, no segments.
    pub fn segments(&self, points: &[DeltaPoint]) -> Vec<Segment> {
        match points {
            [] => Vec::new(),
            [only] => vec![Segment {
                start: 0,
                end: 1,
                winner: Winner::Equal,
                mean_delta: only.delta,
            }],
            _ => {
                let mut segments = Vec::new();
                let mut start = 0;
                for i in 1..=points.len() {
                    let boundary = i == points.len() || points[i].winner != points[start].winner;
                    if boundary {
                        segments.push(close_run(points, start, i));
                        start = i;
                    }
                }
                segments
            }
        }
    }

    /// Delta points and segments of an aligned pair
    #[instrument(
        level = "debug",
        name = "delta_segment",
        skip(self, pair),
        fields(points = pair.len(), threshold = self.threshold)
    )]
    pub fn segment(&self, pair: &AlignedPair) -> Segmentation {
        let points = self.delta_points(pair);
        let segments = self.segments(&points);

        tracing::debug!(segments = segments.len(), "grid segmented");
        metrics::histogram!("segmentation_segments_per_map").record(segments.len() as f64);

        Segmentation { points, segments }
    }
}

fn close_run(points: &[DeltaPoint], start: usize, end: usize) -> Segment {
    let run = &points[start..end];
    let mean_delta = run.iter().map(|p| p.delta).sum::<f64>() / run.len() as f64;
    Segment {
        start,
        end,
        winner: points[start].winner,
        mean_delta,
    }
}
