//! Synthetic laps
//!
//! Generated telemetry on a circular track, for tests and demos without
//! recorded session data.

use std::f64::consts::TAU;

use contracts::{DriverId, RawSample};

use crate::session::{DriverEntry, JsonSession, LapRecord};

/// Synthetic lap configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticLap {
    /// Track length (m)
    pub length_m: f64,
    /// Samples per lap
    pub samples: usize,
    /// Mean speed (km/h)
    pub base_speed_kmh: f64,
    /// Amplitude of the speed oscillation (km/h)
    pub speed_wave_kmh: f64,
    /// Oscillations per lap
    pub waves: f64,
    /// Phase shift of the oscillation (rad)
    pub phase: f64,
    /// DRS open between these distances
    pub drs_zone: Option<(f64, f64)>,
}

impl Default for SyntheticLap {
    fn default() -> Self {
        Self {
            length_m: 5000.0,
            samples: 700,
            base_speed_kmh: 220.0,
            speed_wave_kmh: 60.0,
            waves: 6.0,
            phase: 0.0,
            drs_zone: None,
        }
    }
}

impl SyntheticLap {
    /// Constant-speed lap
    pub fn constant(length_m: f64, samples: usize, speed_kmh: f64) -> Self {
        Self {
            length_m,
            samples,
            base_speed_kmh: speed_kmh,
            speed_wave_kmh: 0.0,
            ..Default::default()
        }
    }

    fn wave(&self, distance: f64) -> f64 {
        (TAU * self.waves * distance / self.length_m + self.phase).sin()
    }

    /// Generate the lap's samples
    pub fn generate(&self) -> Vec<RawSample> {
        let n = self.samples.max(2);
        let radius = self.length_m / TAU;
        (0..n)
            .map(|i| {
                let distance = if i + 1 == n {
                    self.length_m
                } else {
                    self.length_m * i as f64 / (n - 1) as f64
                };
                let angle = TAU * distance / self.length_m;
                let wave = self.wave(distance);
                let speed = self.base_speed_kmh + self.speed_wave_kmh * wave;
                let throttle = if wave >= 0.0 { 100.0 } else { 30.0 };
                let brake = if wave < -0.5 { 100.0 } else { 0.0 };
                let gear = (speed / 45.0).clamp(0.0, 7.0) as u8 + 1;
                let drs = match self.drs_zone {
                    Some((start, end)) if distance >= start && distance <= end => 12,
                    _ => 0,
                };
                RawSample::new(distance, radius * angle.cos(), radius * angle.sin(), speed)
                    .with_inputs(throttle, brake, gear, drs)
            })
            .collect()
    }

    /// Lap time (s) implied by the generated speed trace
    pub fn lap_time_s(&self) -> f64 {
        self.generate()
            .windows(2)
            .map(|w| {
                let mean_ms = (w[0].speed + w[1].speed) / 2.0 / 3.6;
                (w[1].distance - w[0].distance) / mean_ms
            })
            .sum()
    }
}

/// Build a driver entry from synthetic laps, numbered in order from 1
pub fn synthetic_driver(code: &str, team_color: Option<&str>, laps: &[SyntheticLap]) -> DriverEntry {
    DriverEntry {
        code: DriverId::from(code),
        team: None,
        team_color: team_color.map(str::to_string),
        laps: laps
            .iter()
            .zip(1u32..)
            .map(|(lap, lap_number)| LapRecord {
                lap_number,
                lap_time_s: Some(lap.lap_time_s()),
                samples: lap.generate(),
            })
            .collect(),
    }
}

/// Build a session from synthetic drivers
pub fn synthetic_session(session_id: &str, drivers: Vec<DriverEntry>) -> JsonSession {
    JsonSession {
        session_id: session_id.to_string(),
        drivers,
    }
}
