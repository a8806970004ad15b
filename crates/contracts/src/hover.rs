//! HoverRecord - HoverDataBuilder output

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Winner;

/// Marker used in place of a missing or non-finite channel value
pub const UNAVAILABLE: &str = "n/a";

/// Hover key for a per-driver channel, e.g. `driver1.speed`
pub fn channel_key(slot: DriverSlot, channel: &str) -> String {
    format!("{}.{}", slot.key(), channel)
}

/// Position of a driver within a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverSlot {
    Driver1,
    Driver2,
}

impl DriverSlot {
    pub fn key(self) -> &'static str {
        match self {
            DriverSlot::Driver1 => "driver1",
            DriverSlot::Driver2 => "driver2",
        }
    }
}

/// Tooltip payload for one grid index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverRecord {
    /// Grid index
    pub index: usize,
    /// Grid distance (m)
    pub distance: f64,
    pub winner: Winner,
    /// Channel name -> formatted value (`distance`, `delta`, `winner`,
    /// `driver1.speed`, `driver2.drs`, ...)
    pub values: BTreeMap<String, String>,
    /// Pre-rendered tooltip, lines joined by `<br>`
    pub text: String,
}

impl HoverRecord {
    /// Formatted value of a channel
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
