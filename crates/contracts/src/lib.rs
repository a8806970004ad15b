//! # Contracts
//!
//! Frozen interface contracts shared by every stage of the circuit map pipeline.
//! Business crates depend on this crate only; reverse dependencies are prohibited.
//!
//! ## Distance model
//! - Every channel is indexed by lap distance in meters (f64), never by time
//! - Both drivers of a comparison are resampled onto one shared distance grid

mod aligned;
mod circuit_map;
mod color;
mod comparison_config;
mod delta;
mod driver_id;
mod error;
mod hover;
mod provider;
mod telemetry;

pub use aligned::*;
pub use circuit_map::*;
pub use color::*;
pub use comparison_config::*;
pub use delta::*;
pub use driver_id::DriverId;
pub use error::*;
pub use hover::*;
pub use provider::{TeamColorLookup, TelemetryProvider};
pub use telemetry::*;
