//! JSON session file
//!
//! ```json
//! {
//!   "session_id": "2024-bahrain-q",
//!   "drivers": [{
//!     "code": "VER",
//!     "team": "Red Bull Racing",
//!     "team_color": "#3671C6",
//!     "laps": [{ "lap_number": 12, "lap_time_s": 89.7, "samples": [ ... ] }]
//!   }]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use contracts::{DriverId, LapSelector, MapError, RawSample, TeamColorLookup, TelemetryProvider};
use serde::{Deserialize, Serialize};

/// One recorded lap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LapRecord {
    pub lap_number: u32,
    /// Lap time in seconds; absent for untimed laps (in/out laps, deleted times)
    #[serde(default)]
    pub lap_time_s: Option<f64>,
    #[serde(default)]
    pub samples: Vec<RawSample>,
}

impl LapRecord {
    fn timed(&self) -> Option<f64> {
        self.lap_time_s.filter(|t| t.is_finite() && *t > 0.0)
    }
}

/// One driver of the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverEntry {
    pub code: DriverId,
    #[serde(default)]
    pub team: Option<String>,
    /// Hex team color, e.g. `#3671C6`
    #[serde(default)]
    pub team_color: Option<String>,
    #[serde(default)]
    pub laps: Vec<LapRecord>,
}

impl DriverEntry {
    /// Lap matching a selector
    ///
    /// # Errors
    /// `MissingTelemetry` if no lap matches.
    pub fn select_lap(&self, lap: LapSelector) -> Result<&LapRecord, MapError> {
        match lap {
            LapSelector::Fastest => self
                .laps
                .iter()
                .filter_map(|l| l.timed().map(|t| (t, l)))
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, l)| l)
                .ok_or_else(|| MapError::missing_telemetry(&self.code, lap, "no timed lap recorded")),
            LapSelector::Number(n) => self
                .laps
                .iter()
                .find(|l| l.lap_number == n)
                .ok_or_else(|| MapError::missing_telemetry(&self.code, lap, "lap not recorded")),
        }
    }

    /// Fastest timed lap, if any
    pub fn fastest_lap(&self) -> Option<&LapRecord> {
        self.select_lap(LapSelector::Fastest).ok()
    }
}

/// File-backed session implementing the provider interfaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSession {
    pub session_id: String,
    pub drivers: Vec<DriverEntry>,
}

impl JsonSession {
    /// Load a session from a JSON file
    ///
    /// # Errors
    /// - File read failure
    /// - Malformed JSON or duplicate driver / lap entries
    pub fn load_from_path(path: &Path) -> Result<Self, MapError> {
        let content = std::fs::read_to_string(path)?;
        let session: Self = content.parse()?;
        tracing::info!(
            path = %path.display(),
            session_id = %session.session_id,
            drivers = session.drivers.len(),
            "session loaded"
        );
        Ok(session)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MapError::session_format(format!("JSON serialize error: {e}")))
    }

    /// Driver entry by code
    ///
    /// # Errors
    /// `DriverNotFound` if absent.
    pub fn driver(&self, driver: &DriverId) -> Result<&DriverEntry, MapError> {
        self.drivers
            .iter()
            .find(|d| &d.code == driver)
            .ok_or_else(|| MapError::driver_not_found(driver))
    }

    fn check_unique(&self) -> Result<(), MapError> {
        let mut codes = HashSet::new();
        for entry in &self.drivers {
            if !codes.insert(&entry.code) {
                return Err(MapError::session_format(format!(
                    "duplicate driver '{}'",
                    entry.code
                )));
            }
            let mut laps = HashSet::new();
            for lap in &entry.laps {
                if !laps.insert(lap.lap_number) {
                    return Err(MapError::session_format(format!(
                        "duplicate lap {} for driver '{}'",
                        lap.lap_number, entry.code
                    )));
                }
            }
        }
        Ok(())
    }
}

impl FromStr for JsonSession {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let session: JsonSession = serde_json::from_str(s)
            .map_err(|e| MapError::session_format(format!("JSON parse error: {e}")))?;
        session.check_unique()?;
        Ok(session)
    }
}

impl TelemetryProvider for JsonSession {
    fn drivers(&self) -> Vec<DriverId> {
        self.drivers.iter().map(|d| d.code.clone()).collect()
    }

    fn lap_samples(&self, driver: &DriverId, lap: LapSelector) -> Result<Vec<RawSample>, MapError> {
        let record = self.driver(driver)?.select_lap(lap)?;
        if record.samples.is_empty() {
            return Err(MapError::missing_telemetry(
                driver,
                lap,
                format!("lap {} has no telemetry samples", record.lap_number),
            ));
        }
        tracing::debug!(
            driver = %driver,
            lap = %lap,
            lap_number = record.lap_number,
            samples = record.samples.len(),
            "lap telemetry selected"
        );
        Ok(record.samples.clone())
    }

    fn has_driver(&self, driver: &DriverId) -> bool {
        self.drivers.iter().any(|d| &d.code == driver)
    }
}

impl TeamColorLookup for JsonSession {
    fn team_color(&self, driver: &DriverId) -> Option<String> {
        self.driver(driver).ok().and_then(|d| d.team_color.clone())
    }
}
