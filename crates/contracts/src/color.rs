//! Display colors - ColorResolver output

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseColorError, Winner};

/// 8-bit sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    /// Color of `Equal` segments
    pub const NEUTRAL: Rgb = Rgb::new(0xd3, 0xd3, 0xd3);
    /// Fallback for the first driver slot
    pub const DRIVER1_DEFAULT: Rgb = Rgb::new(0x36, 0x71, 0xc6);
    /// Fallback for the second driver slot
    pub const DRIVER2_DEFAULT: Rgb = Rgb::new(0xff, 0x1e, 0x1e);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move each channel toward `target` by `factor` (0 = unchanged, 1 = target).
    ///
    /// `result = self + (target - self) * factor`, clamped to the channel range.
    pub fn blend_toward(self, target: Rgb, factor: f64) -> Rgb {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let channel = |from: u8, to: u8| -> u8 {
            let from = f64::from(from);
            let value = from + (f64::from(to) - from) * factor;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, target.r),
            channel(self.g, target.g),
            channel(self.b, target.b),
        )
    }

    /// Blend toward white
    #[inline]
    pub fn lighten(self, factor: f64) -> Rgb {
        self.blend_toward(Rgb::WHITE, factor)
    }

    /// Blend toward black
    #[inline]
    pub fn darken(self, factor: f64) -> Rgb {
        self.blend_toward(Rgb::BLACK, factor)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#rrggbb` or `rrggbb`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Resolved color of one driver slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverColorProfile {
    /// Team color, or the slot default when the lookup failed
    pub base_color: Rgb,
    /// Both drivers share a base color
    pub is_teammate_pair: bool,
    /// Color actually drawn
    pub resolved_color: Rgb,
    /// Base color came from the default palette
    pub fallback: bool,
}

/// Colors for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub driver1: DriverColorProfile,
    pub driver2: DriverColorProfile,
    pub neutral: Rgb,
}

impl ColorPair {
    /// Segment color for a winner
    pub fn color_for(&self, winner: Winner) -> Rgb {
        match winner {
            Winner::Driver1 => self.driver1.resolved_color,
            Winner::Driver2 => self.driver2.resolved_color,
            Winner::Equal => self.neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let c: Rgb = "#3671C6".parse().unwrap();
        assert_eq!(c, Rgb::new(0x36, 0x71, 0xc6));
        assert_eq!(c.to_string(), "#3671c6");

        let c: Rgb = "27F4D2".parse().unwrap();
        assert_eq!(c.to_string(), "#27f4d2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("red".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
        assert!("#+f+f+f".parse::<Rgb>().is_err());

        let err = "teal".parse::<Rgb>().unwrap_err();
        assert_eq!(err, ParseColorError("teal".to_string()));
        assert_eq!(err.to_string(), "invalid hex color 'teal'");
    }

    #[test]
    fn test_lighten_bounds() {
        let red = Rgb::new(0xff, 0x00, 0x00);
        assert_eq!(red.lighten(0.0), red);
        assert_eq!(Rgb::BLACK.lighten(1.0), Rgb::WHITE);
        assert_eq!(Rgb::BLACK.lighten(1.0).to_string(), "#ffffff");
    }

    #[test]
    fn test_lighten_per_channel() {
        // 0x36 = 54 -> 54 + 201 * 0.4 = 134.4 -> 134
        let lightened = Rgb::DRIVER1_DEFAULT.lighten(0.4);
        assert_eq!(lightened.r, 134);
        // 0x71 = 113 -> 113 + 142 * 0.4 = 169.8 -> 170
        assert_eq!(lightened.g, 170);
        // 0xc6 = 198 -> 198 + 57 * 0.4 = 220.8 -> 221
        assert_eq!(lightened.b, 221);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgb::NEUTRAL).unwrap();
        assert_eq!(json, "\"#d3d3d3\"");
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgb::NEUTRAL);
    }

    #[test]
    fn test_color_for_winner() {
        let profile = |c: Rgb| DriverColorProfile {
            base_color: c,
            is_teammate_pair: false,
            resolved_color: c,
            fallback: false,
        };
        let pair = ColorPair {
            driver1: profile(Rgb::DRIVER1_DEFAULT),
            driver2: profile(Rgb::DRIVER2_DEFAULT),
            neutral: Rgb::NEUTRAL,
        };
        assert_eq!(pair.color_for(Winner::Driver1), Rgb::DRIVER1_DEFAULT);
        assert_eq!(pair.color_for(Winner::Driver2), Rgb::DRIVER2_DEFAULT);
        assert_eq!(pair.color_for(Winner::Equal), Rgb::NEUTRAL);
    }
}
