//! HoverDataBuilder implementation.

use std::collections::BTreeMap;

use contracts::{
    channel_key, AlignedPair, AlignedSample, DeltaPoint, DriverId, DriverSlot, DrsState,
    HoverRecord, Winner, UNAVAILABLE,
};

/// Label of a winner: the faster driver's code, or `Equal`
pub fn winner_label(winner: Winner, driver1: &DriverId, driver2: &DriverId) -> String {
    match winner {
        Winner::Driver1 => driver1.to_string(),
        Winner::Driver2 => driver2.to_string(),
        Winner::Equal => "Equal".to_string(),
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn fmt_or_unavailable(value: Option<f64>, f: impl FnOnce(f64) -> String) -> String {
    value
        .and_then(finite)
        .map(f)
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

fn drs_label(code: Option<u8>) -> String {
    match code.map(DrsState::from_code) {
        Some(state) if state.is_open() => "Active".to_string(),
        Some(_) => "Inactive".to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

/// Formatted channels of one driver at one grid point
struct DriverChannels {
    speed: String,
    throttle: String,
    brake: String,
    gear: String,
    drs: String,
}

impl DriverChannels {
    fn new(sample: &AlignedSample) -> Self {
        Self {
            speed: fmt_or_unavailable(Some(sample.speed), |v| format!("{v:.1} km/h")),
            throttle: fmt_or_unavailable(sample.throttle, |v| format!("{v:.0}%")),
            brake: fmt_or_unavailable(sample.brake, |v| format!("{v:.0}%")),
            gear: sample
                .gear
                .map(|g| g.to_string())
                .unwrap_or_else(|| UNAVAILABLE.to_string()),
            drs: drs_label(sample.drs),
        }
    }

    fn insert_into(&self, slot: DriverSlot, values: &mut BTreeMap<String, String>) {
        values.insert(channel_key(slot, "speed"), self.speed.clone());
        values.insert(channel_key(slot, "throttle"), self.throttle.clone());
        values.insert(channel_key(slot, "brake"), self.brake.clone());
        values.insert(channel_key(slot, "gear"), self.gear.clone());
        values.insert(channel_key(slot, "drs"), self.drs.clone());
    }

    fn input_line(&self, driver: &DriverId) -> String {
        format!(
            "{driver}: Throttle {} | Brake {} | Gear {} | DRS {}",
            self.throttle, self.brake, self.gear, self.drs
        )
    }
}

/// Builds one tooltip record per grid index
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverDataBuilder;

impl HoverDataBuilder {
    pub fn new() -> Self {
        Self
    }

    /// One record per delta point, read from both aligned series at the same
    /// index. Non-finite or absent values render as `n/a`.
    pub fn build(&self, pair: &AlignedPair, points: &[DeltaPoint]) -> Vec<HoverRecord> {
        let (driver1, driver2) = (&pair.driver1.driver, &pair.driver2.driver);
        points
            .iter()
            .zip(pair.driver1.samples.iter().zip(&pair.driver2.samples))
            .map(|(point, (s1, s2))| self.record(driver1, driver2, point, s1, s2))
            .collect()
    }

    fn record(
        &self,
        driver1: &DriverId,
        driver2: &DriverId,
        point: &DeltaPoint,
        s1: &AlignedSample,
        s2: &AlignedSample,
    ) -> HoverRecord {
        let distance = fmt_or_unavailable(Some(point.distance), |v| format!("{v:.0}m"));
        let delta = fmt_or_unavailable(Some(point.delta), |v| format!("{v:+.1} km/h"));
        let winner = winner_label(point.winner, driver1, driver2);
        let c1 = DriverChannels::new(s1);
        let c2 = DriverChannels::new(s2);

        let mut values = BTreeMap::new();
        values.insert("distance".to_string(), distance.clone());
        values.insert("delta".to_string(), delta.clone());
        values.insert("winner".to_string(), winner);
        c1.insert_into(DriverSlot::Driver1, &mut values);
        c2.insert_into(DriverSlot::Driver2, &mut values);

        let text = [
            format!("Distance: {distance}"),
            format!("Speed {driver1}: {}", c1.speed),
            format!("Speed {driver2}: {}", c2.speed),
            format!("Delta: {delta}"),
            String::new(),
            c1.input_line(driver1),
            c2.input_line(driver2),
        ]
        .join("<br>");

        HoverRecord {
            index: point.index,
            distance: point.distance,
            winner: point.winner,
            values,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{AlignedSeries, DistanceRange, SeriesReport};

    fn sample(distance: f64, speed: f64) -> AlignedSample {
        AlignedSample {
            distance,
            x: 0.0,
            y: 0.0,
            speed,
            throttle: Some(99.6),
            brake: Some(0.0),
            gear: Some(8),
            drs: Some(12),
        }
    }

    fn report(driver: &str) -> SeriesReport {
        SeriesReport {
            driver: driver.into(),
            raw_samples: 1,
            valid_samples: 1,
            native_range: DistanceRange::new(0.0, 0.0),
            clamped_points: 0,
        }
    }

    fn pair(s1: AlignedSample, s2: AlignedSample) -> AlignedPair {
        AlignedPair {
            grid: vec![s1.distance],
            driver1: AlignedSeries {
                driver: "VER".into(),
                samples: vec![s1],
            },
            driver2: AlignedSeries {
                driver: "LEC".into(),
                samples: vec![s2],
            },
            reports: [report("VER"), report("LEC")],
        }
    }

    fn point(s1: &AlignedSample, s2: &AlignedSample, winner: Winner) -> DeltaPoint {
        DeltaPoint {
            index: 0,
            distance: s1.distance,
            speed1: s1.speed,
            speed2: s2.speed,
            delta: s1.speed - s2.speed,
            winner,
        }
    }

    #[test]
    fn test_record_values_and_text() {
        let s1 = sample(1234.4, 301.24);
        let mut s2 = sample(1234.4, 298.0);
        s2.drs = Some(8);
        s2.gear = Some(7);
        let records = HoverDataBuilder::new().build(&pair(s1, s2), &[point(&s1, &s2, Winner::Driver1)]);

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.value("distance"), Some("1234m"));
        assert_eq!(r.value("delta"), Some("+3.2 km/h"));
        assert_eq!(r.value("winner"), Some("VER"));
        assert_eq!(r.value("driver1.throttle"), Some("100%"));
        assert_eq!(r.value("driver1.drs"), Some("Active"));
        assert_eq!(r.value("driver2.drs"), Some("Inactive"));
        assert_eq!(r.value("driver2.gear"), Some("7"));
        assert_eq!(
            r.text,
            "Distance: 1234m<br>Speed VER: 301.2 km/h<br>Speed LEC: 298.0 km/h<br>Delta: +3.2 km/h<br>\
             <br>VER: Throttle 100% | Brake 0% | Gear 8 | DRS Active<br>\
             LEC: Throttle 100% | Brake 0% | Gear 7 | DRS Inactive"
        );
    }

    #[test]
    fn test_missing_channels_render_unavailable() {
        let mut s1 = sample(10.0, 250.0);
        s1.throttle = None;
        s1.brake = Some(f64::NAN);
        s1.gear = None;
        s1.drs = None;
        let s2 = sample(10.0, 250.0);
        let records = HoverDataBuilder::new().build(&pair(s1, s2), &[point(&s1, &s2, Winner::Equal)]);
        let r = &records[0];
        assert_eq!(r.value("driver1.throttle"), Some(UNAVAILABLE));
        assert_eq!(r.value("driver1.brake"), Some(UNAVAILABLE));
        assert_eq!(r.value("driver1.gear"), Some(UNAVAILABLE));
        assert_eq!(r.value("driver1.drs"), Some(UNAVAILABLE));
        assert_eq!(r.value("winner"), Some("Equal"));
        assert!(!r.text.contains("NaN"));
        assert!(r.text.contains("VER: Throttle n/a | Brake n/a | Gear n/a | DRS n/a"));
    }

    #[test]
    fn test_negative_delta_sign() {
        let s1 = sample(0.0, 280.0);
        let s2 = sample(0.0, 290.0);
        let records = HoverDataBuilder::new().build(&pair(s1, s2), &[point(&s1, &s2, Winner::Driver2)]);
        assert_eq!(records[0].value("delta"), Some("-10.0 km/h"));
        assert_eq!(records[0].value("winner"), Some("LEC"));
    }
}
