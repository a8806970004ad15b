//! # Circuit Map
//!
//! Assembles a driver-vs-driver circuit delta map:
//! telemetry alignment -> delta segmentation -> colors and hover data.
//!
//! Every stage is synchronous and pure; identical inputs give identical
//! maps, so results can be memoized by [`CacheKey`].
//!
//! ## Usage
//!
//! ```ignore
//! use circuit_map::CircuitMapAssembler;
//! use contracts::{ComparisonConfig, LapSelector};
//!
//! let assembler = CircuitMapAssembler::new(ComparisonConfig::default())?;
//! let map = assembler.assemble_from_session(
//!     &session, &session, &"VER".into(), &"LEC".into(), LapSelector::Fastest,
//! )?;
//! for segment in &map.segments {
//!     draw_polyline(&segment.points, segment.color);
//! }
//! ```

mod assembler;
mod cache;

pub use assembler::{fetch_telemetry, CircuitMapAssembler, DriverTelemetry};
pub use cache::{cached_assemble, CacheKey, InMemoryMapCache, MapCache};

pub use contracts::{CircuitMap, LegendEntry, MapSegment, TrackPoint};
