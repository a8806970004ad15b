//! CircuitMapAssembler implementation.

use std::time::Instant;

use alignment::TelemetryAligner;
use contracts::{
    AlignedPair, CircuitMap, ColorPair, ComparisonConfig, DriverId, DrsZones,
    LapSelector, LegendEntry, MapError, MapSegment, RawSample, Segment, TeamColorLookup,
    TelemetryProvider, TrackPoint, Winner,
};
use presentation::{ColorResolver, HoverDataBuilder};
use segmentation::{drs_zones, DeltaSegmenter};
use tracing::instrument;

use crate::cache::CacheKey;

/// One driver's raw lap, already resolved from a lap selector
#[derive(Debug, Clone, PartialEq)]
pub struct DriverTelemetry {
    pub driver: DriverId,
    pub samples: Vec<RawSample>,
}

impl DriverTelemetry {
    pub fn new(driver: impl Into<DriverId>, samples: Vec<RawSample>) -> Self {
        Self {
            driver: driver.into(),
            samples,
        }
    }
}

/// Fetch one driver's lap from a provider
///
/// # Errors
/// - `DriverNotFound` if the driver is not in the session
/// - `MissingTelemetry` if the lap is absent or carries no samples
pub fn fetch_telemetry(
    provider: &dyn TelemetryProvider,
    driver: &DriverId,
    lap: LapSelector,
) -> Result<DriverTelemetry, MapError> {
    if !provider.has_driver(driver) {
        return Err(MapError::driver_not_found(driver));
    }
    let samples = provider.lap_samples(driver, lap)?;
    if samples.is_empty() {
        return Err(MapError::missing_telemetry(driver, lap, "lap has no samples"));
    }
    Ok(DriverTelemetry::new(driver, samples))
}

/// Orchestrates alignment, segmentation, colors and hover data into a
/// [`CircuitMap`]
#[derive(Debug, Clone)]
pub struct CircuitMapAssembler {
    config: ComparisonConfig,
    aligner: TelemetryAligner,
    segmenter: DeltaSegmenter,
    colors: ColorResolver,
    hover: HoverDataBuilder,
}

impl CircuitMapAssembler {
    /// # Errors
    /// `ConfigValidation` if the config is out of range.
    pub fn new(config: ComparisonConfig) -> Result<Self, MapError> {
        config_loader::validate(&config)?;
        Ok(Self {
            aligner: TelemetryAligner::from_config(&config),
            segmenter: DeltaSegmenter::from_config(&config),
            colors: ColorResolver::from_config(&config),
            hover: HoverDataBuilder::new(),
            config,
        })
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Cache key of a comparison under this assembler's config
    pub fn cache_key(
        &self,
        session_id: &str,
        driver1: &DriverId,
        driver2: &DriverId,
        lap: LapSelector,
    ) -> CacheKey {
        CacheKey::new(session_id, driver1, driver2, lap, &self.config)
    }

    /// Build the map from two already-fetched laps
    ///
    /// # Errors
    /// `EmptyData` / `InvalidRange` from alignment, propagated unchanged.
    #[instrument(
        level = "info",
        name = "circuit_map_assemble",
        skip_all,
        fields(driver1 = %telemetry1.driver, driver2 = %telemetry2.driver, lap = %lap)
    )]
    pub fn assemble(
        &self,
        telemetry1: &DriverTelemetry,
        telemetry2: &DriverTelemetry,
        lap: LapSelector,
        lookup: &dyn TeamColorLookup,
    ) -> Result<CircuitMap, MapError> {
        let started = Instant::now();
        let (driver1, driver2) = (&telemetry1.driver, &telemetry2.driver);

        let pair = self
            .aligner
            .align(driver1, &telemetry1.samples, driver2, &telemetry2.samples)
            .inspect_err(|e| {
                metrics::counter!("circuit_map_failures_total", "kind" => e.kind().to_string())
                    .increment(1);
            })?;
        let Some(span) = pair.span() else {
            return Err(MapError::EmptyData {
                driver: driver1.clone(),
                valid: 0,
                required: 1,
            });
        };

        let segmentation = self.segmenter.segment(&pair);
        let colors = self.colors.resolve(driver1, driver2, lookup);
        let hover = self.hover.build(&pair, &segmentation.points);
        let segments = map_segments(&pair, &segmentation.segments, &colors);

        let drs = DrsZones {
            driver1: drs_zones(&pair.driver1, self.config.drs_min_zone_m),
            driver2: drs_zones(&pair.driver2, self.config.drs_min_zone_m),
        };

        let map = CircuitMap {
            title: format!("Circuit Map – {driver1} vs {driver2}"),
            driver1: driver1.clone(),
            driver2: driver2.clone(),
            lap,
            span,
            num_points: pair.len(),
            delta_threshold: self.segmenter.threshold(),
            legend: legend(driver1, driver2, &colors),
            colors,
            segments,
            deltas: segmentation.points,
            hover,
            drs_zones: drs,
            reports: pair.reports,
        };

        metrics::counter!("circuit_map_assembled_total").increment(1);
        metrics::histogram!("circuit_map_assemble_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(
            segments = map.segments.len(),
            points = map.num_points,
            "circuit map assembled"
        );

        Ok(map)
    }

    /// Fetch both drivers' laps from a session and assemble
    ///
    /// # Errors
    /// `DriverNotFound` / `MissingTelemetry` from the fetch, then any
    /// [`assemble`](Self::assemble) error.
    pub fn assemble_from_session(
        &self,
        provider: &dyn TelemetryProvider,
        lookup: &dyn TeamColorLookup,
        driver1: &DriverId,
        driver2: &DriverId,
        lap: LapSelector,
    ) -> Result<CircuitMap, MapError> {
        let telemetry1 = fetch_telemetry(provider, driver1, lap)?;
        let telemetry2 = fetch_telemetry(provider, driver2, lap)?;
        self.assemble(&telemetry1, &telemetry2, lap, lookup)
    }
}

/// Colored polylines, geometry from driver1's aligned track.
///
/// Each polyline runs over grid indices `start..=end` (clipped to the grid)
/// so consecutive segments share their boundary point.
fn map_segments(pair: &AlignedPair, segments: &[Segment], colors: &ColorPair) -> Vec<MapSegment> {
    let track = &pair.driver1.samples;
    let last = track.len().saturating_sub(1);
    segments
        .iter()
        .map(|segment| MapSegment {
            start: segment.start,
            end: segment.end,
            winner: segment.winner,
            color: colors.color_for(segment.winner),
            mean_delta: segment.mean_delta,
            points: track[segment.start..=segment.end.min(last)]
                .iter()
                .map(|s| TrackPoint { x: s.x, y: s.y })
                .collect(),
        })
        .collect()
}

fn legend(driver1: &DriverId, driver2: &DriverId, colors: &ColorPair) -> Vec<LegendEntry> {
    [
        (format!("{driver1} faster"), Winner::Driver1),
        (format!("{driver2} faster"), Winner::Driver2),
        ("Equal pace".to_string(), Winner::Equal),
    ]
    .into_iter()
    .map(|(label, winner)| LegendEntry {
        label,
        color: colors.color_for(winner),
        winner,
    })
    .collect()
}
