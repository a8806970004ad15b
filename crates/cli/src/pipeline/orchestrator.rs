//! Comparison orchestrator - fetches both laps and drives the assembler.
//!
//! The two telemetry fetches run in parallel on blocking tasks; assembly
//! itself is synchronous and runs once both laps are materialized.

use std::sync::Arc;
use std::time::Instant;

use circuit_map::{fetch_telemetry, CircuitMapAssembler, DriverTelemetry};
use contracts::{CircuitMap, ComparisonConfig, DriverId, LapSelector, MapError};
use observability::record_map_metrics;
use session_source::JsonSession;
use tracing::{debug, info};

use super::ComparisonStats;
use crate::error::CliError;

/// One comparison to run
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub driver1: DriverId,
    pub driver2: DriverId,
    pub lap: LapSelector,
    pub config: ComparisonConfig,
}

/// Comparison orchestrator
pub struct Comparison {
    session: Arc<JsonSession>,
    request: ComparisonRequest,
}

impl Comparison {
    /// # Errors
    /// `SameDriver` if both slots name the same driver.
    pub fn new(session: Arc<JsonSession>, request: ComparisonRequest) -> Result<Self, CliError> {
        if request.driver1 == request.driver2 {
            return Err(CliError::same_driver(request.driver1.as_str()));
        }
        Ok(Self { session, request })
    }

    pub fn request(&self) -> &ComparisonRequest {
        &self.request
    }

    /// Fetch, assemble and collect statistics
    pub async fn run(self) -> Result<(CircuitMap, ComparisonStats), CliError> {
        let assembler = CircuitMapAssembler::new(self.request.config.clone())?;
        let mut stats = ComparisonStats::default();

        let fetch_started = Instant::now();
        let (telemetry1, telemetry2) = self.fetch_pair().await?;
        stats.fetch = fetch_started.elapsed();
        stats.raw_samples = [telemetry1.samples.len(), telemetry2.samples.len()];

        debug!(
            driver1 = %telemetry1.driver,
            samples1 = telemetry1.samples.len(),
            driver2 = %telemetry2.driver,
            samples2 = telemetry2.samples.len(),
            "telemetry fetched"
        );

        let assemble_started = Instant::now();
        let map = assembler.assemble(
            &telemetry1,
            &telemetry2,
            self.request.lap,
            self.session.as_ref(),
        )?;
        stats.assemble = assemble_started.elapsed();

        record_map_metrics(&map);
        stats.deltas.update(&map);

        info!(
            session = %self.session.session_id,
            segments = map.segments.len(),
            fetch_ms = stats.fetch.as_millis() as u64,
            assemble_ms = stats.assemble.as_millis() as u64,
            "comparison complete"
        );

        Ok((map, stats))
    }

    /// Both drivers' laps, fetched concurrently
    async fn fetch_pair(&self) -> Result<(DriverTelemetry, DriverTelemetry), CliError> {
        let task1 = self.spawn_fetch(self.request.driver1.clone());
        let task2 = self.spawn_fetch(self.request.driver2.clone());
        let (joined1, joined2) = tokio::join!(task1, task2);

        let telemetry1 = joined1.map_err(|e| {
            CliError::fetch_aborted(self.request.driver1.as_str(), e.to_string())
        })??;
        let telemetry2 = joined2.map_err(|e| {
            CliError::fetch_aborted(self.request.driver2.as_str(), e.to_string())
        })??;
        Ok((telemetry1, telemetry2))
    }

    fn spawn_fetch(
        &self,
        driver: DriverId,
    ) -> tokio::task::JoinHandle<Result<DriverTelemetry, MapError>> {
        let session = Arc::clone(&self.session);
        let lap = self.request.lap;
        tokio::task::spawn_blocking(move || fetch_telemetry(session.as_ref(), &driver, lap))
    }
}
