//! RawSample - telemetry provider output
//!
//! One captured reading for one driver, plus lap selection and DRS decoding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseLapSelectorError;

/// Raw telemetry sample
///
/// Owned by the telemetry provider; read-only to the pipeline. Position and
/// speed channels are plain `f64` and may be NaN (JSON `null` decodes to NaN);
/// auxiliary channels are optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Meters from the start line, non-decreasing within a lap
    #[serde(deserialize_with = "nullable_f64")]
    pub distance: f64,

    /// Track position
    #[serde(deserialize_with = "nullable_f64")]
    pub x: f64,

    #[serde(deserialize_with = "nullable_f64")]
    pub y: f64,

    /// Speed (km/h)
    #[serde(deserialize_with = "nullable_f64")]
    pub speed: f64,

    /// Throttle application (0-100)
    #[serde(default)]
    pub throttle: Option<f64>,

    /// Brake application (0-100); boolean brake flags decode to 0 / 100
    #[serde(default, deserialize_with = "brake_level")]
    pub brake: Option<f64>,

    /// Gear (0 = neutral)
    #[serde(default)]
    pub gear: Option<u8>,

    /// Encoded DRS state, see [`DrsState::from_code`]
    #[serde(default)]
    pub drs: Option<u8>,
}

impl RawSample {
    /// Sample with position and speed only
    pub fn new(distance: f64, x: f64, y: f64, speed: f64) -> Self {
        Self {
            distance,
            x,
            y,
            speed,
            throttle: None,
            brake: None,
            gear: None,
            drs: None,
        }
    }

    /// Attach driver inputs
    pub fn with_inputs(mut self, throttle: f64, brake: f64, gear: u8, drs: u8) -> Self {
        self.throttle = Some(throttle);
        self.brake = Some(brake);
        self.gear = Some(gear);
        self.drs = Some(drs);
        self
    }
}

fn nullable_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BrakeValue {
    Flag(bool),
    Level(f64),
}

fn brake_level<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<BrakeValue>::deserialize(deserializer)?.map(|value| match value {
            BrakeValue::Flag(true) => 100.0,
            BrakeValue::Flag(false) => 0.0,
            BrakeValue::Level(level) => level,
        }),
    )
}

/// DRS flap state decoded from the provider's integer code
///
/// Codes: 0-1 off, 8 eligible (detected, not yet opened), 10/12/14 open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrsState {
    Closed,
    Eligible,
    Open,
}

impl DrsState {
    /// Decode a provider DRS code
    pub fn from_code(code: u8) -> Self {
        match code {
            10 | 12 | 14 => DrsState::Open,
            8 => DrsState::Eligible,
            _ => DrsState::Closed,
        }
    }

    /// Whether the flap is open
    pub fn is_open(self) -> bool {
        self == DrsState::Open
    }
}

/// Which lap of a driver to compare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LapSelector {
    /// Lap with the lowest recorded lap time
    #[default]
    Fastest,
    /// Explicit lap number
    Number(u32),
}

impl fmt::Display for LapSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LapSelector::Fastest => write!(f, "fastest lap"),
            LapSelector::Number(n) => write!(f, "lap {n}"),
        }
    }
}

impl FromStr for LapSelector {
    type Err = ParseLapSelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("fastest") {
            return Ok(LapSelector::Fastest);
        }
        trimmed
            .parse::<u32>()
            .map(LapSelector::Number)
            .map_err(|_| ParseLapSelectorError(trimmed.to_string()))
    }
}

impl Serialize for LapSelector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            LapSelector::Fastest => serializer.serialize_str("fastest"),
            LapSelector::Number(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for LapSelector {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(LapSelector::Number(n)),
            Repr::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
