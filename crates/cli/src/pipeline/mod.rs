//! Comparison orchestration module.

mod orchestrator;
mod stats;

pub use orchestrator::{Comparison, ComparisonRequest};
pub use stats::ComparisonStats;
