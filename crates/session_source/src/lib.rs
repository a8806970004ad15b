//! # Session Source
//!
//! Session data behind the pipeline's provider interfaces.
//!
//! Responsibilities:
//! - Load a JSON session file (drivers, team colors, laps, samples)
//! - Resolve a lap selector (`fastest` or a lap number) to concrete samples
//! - Generate synthetic laps for tests and demos
//!
//! ## Usage Example
//!
//! ```ignore
//! use contracts::{LapSelector, TelemetryProvider};
//! use session_source::JsonSession;
//!
//! let session = JsonSession::load_from_path(Path::new("bahrain_q.json"))?;
//! let samples = session.lap_samples(&"VER".into(), LapSelector::Fastest)?;
//! ```

mod session;
mod synthetic;

pub use session::{DriverEntry, JsonSession, LapRecord};
pub use synthetic::{synthetic_driver, synthetic_session, SyntheticLap};
