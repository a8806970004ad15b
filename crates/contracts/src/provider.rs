//! Provider interfaces - the pipeline's upstream seams

use std::collections::HashMap;

use crate::{DriverId, LapSelector, MapError, RawSample};

/// Source of per-driver lap telemetry for one session
///
/// Implementations must be shareable across threads so both drivers can be
/// fetched concurrently.
pub trait TelemetryProvider: Send + Sync {
    /// Drivers present in the session
    fn drivers(&self) -> Vec<DriverId>;

    /// Raw samples of one lap, ordered as captured
    ///
    /// # Errors
    /// - `DriverNotFound` if the driver is not in the session
    /// - `MissingTelemetry` if the lap does not exist or has no samples
    fn lap_samples(&self, driver: &DriverId, lap: LapSelector)
        -> Result<Vec<RawSample>, MapError>;

    /// Whether the session contains a driver
    fn has_driver(&self, driver: &DriverId) -> bool {
        self.drivers().iter().any(|d| d == driver)
    }
}

/// Team color lookup, returning a hex string such as `#3671C6`
///
/// Returning `None` or a malformed string makes the resolver fall back to
/// the slot default.
pub trait TeamColorLookup {
    fn team_color(&self, driver: &DriverId) -> Option<String>;
}

impl TeamColorLookup for HashMap<DriverId, String> {
    fn team_color(&self, driver: &DriverId) -> Option<String> {
        self.get(driver).cloned()
    }
}

impl<T: TeamColorLookup + ?Sized> TeamColorLookup for &T {
    fn team_color(&self, driver: &DriverId) -> Option<String> {
        (**self).team_color(driver)
    }
}
