//! ColorResolver implementation.

use contracts::{ColorPair, ComparisonConfig, DriverColorProfile, DriverId, Rgb, TeamColorLookup};
use tracing::instrument;

/// Which side of the comparison a color is resolved for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    First,
    Second,
}

impl Slot {
    fn default_color(self) -> Rgb {
        match self {
            Slot::First => Rgb::DRIVER1_DEFAULT,
            Slot::Second => Rgb::DRIVER2_DEFAULT,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Slot::First => "driver1",
            Slot::Second => "driver2",
        }
    }
}

/// Maps two drivers to a distinct display color pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorResolver {
    lighten_factor: f64,
    neutral: Rgb,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::from_config(&ComparisonConfig::default())
    }
}

impl ColorResolver {
    pub fn new(lighten_factor: f64) -> Self {
        Self {
            lighten_factor,
            neutral: Rgb::NEUTRAL,
        }
    }

    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(config.lighten_factor).with_neutral(config.neutral_color)
    }

    /// Override the `Equal` color
    pub fn with_neutral(mut self, neutral: Rgb) -> Self {
        self.neutral = neutral;
        self
    }

    pub fn lighten_factor(&self) -> f64 {
        self.lighten_factor
    }

    /// Resolve both drivers' colors.
    ///
    /// Missing or malformed team colors fall back to a per-slot default. When
    /// both base colors are equal the second driver gets a lightened variant.
    #[instrument(level = "debug", name = "color_resolve", skip(self, lookup))]
    pub fn resolve(
        &self,
        driver1: &DriverId,
        driver2: &DriverId,
        lookup: &dyn TeamColorLookup,
    ) -> ColorPair {
        let (base1, fallback1) = base_color(driver1, lookup, Slot::First);
        let (base2, fallback2) = base_color(driver2, lookup, Slot::Second);
        let is_teammate_pair = base1 == base2;

        let resolved2 = if is_teammate_pair {
            self.contrast_variant(base1)
        } else {
            base2
        };

        ColorPair {
            driver1: DriverColorProfile {
                base_color: base1,
                is_teammate_pair,
                resolved_color: base1,
                fallback: fallback1,
            },
            driver2: DriverColorProfile {
                base_color: base2,
                is_teammate_pair,
                resolved_color: resolved2,
                fallback: fallback2,
            },
            neutral: self.neutral,
        }
    }

    /// A color distinct from `base`: lightened, else darkened (for white),
    /// else a slot default.
    fn contrast_variant(&self, base: Rgb) -> Rgb {
        let lightened = base.lighten(self.lighten_factor);
        if lightened != base {
            return lightened;
        }
        let darkened = base.darken(self.lighten_factor);
        if darkened != base {
            return darkened;
        }
        [Rgb::DRIVER2_DEFAULT, Rgb::DRIVER1_DEFAULT]
            .into_iter()
            .find(|&c| c != base)
            .unwrap_or(Rgb::NEUTRAL)
    }
}

fn base_color(driver: &DriverId, lookup: &dyn TeamColorLookup, slot: Slot) -> (Rgb, bool) {
    let Some(raw) = lookup.team_color(driver) else {
        tracing::warn!(driver = %driver, slot = slot.label(), "no team color, using default");
        metrics::counter!("color_fallbacks_total", "reason" => "missing").increment(1);
        return (slot.default_color(), true);
    };
    match raw.parse::<Rgb>() {
        Ok(color) => (color, false),
        Err(e) => {
            tracing::warn!(driver = %driver, slot = slot.label(), error = %e, "malformed team color, using default");
            metrics::counter!("color_fallbacks_total", "reason" => "malformed").increment(1);
            (slot.default_color(), true)
        }
    }
}
