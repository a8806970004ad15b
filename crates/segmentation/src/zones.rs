//! DRS zone extraction

use contracts::{AlignedSeries, DistanceRange, DrsState};

/// Maximal runs of grid points with the DRS flap open, as distance ranges.
///
/// Runs no longer than `min_length_m` are discarded as noise. Points without
/// a DRS reading count as closed.
pub fn drs_zones(series: &AlignedSeries, min_length_m: f64) -> Vec<DistanceRange> {
    let mut zones = Vec::new();
    let mut open_from: Option<f64> = None;
    let mut last_open = 0.0;

    for sample in &series.samples {
        let open = sample.drs.is_some_and(|code| DrsState::from_code(code).is_open());
        match (open, open_from) {
            (true, None) => {
                open_from = Some(sample.distance);
                last_open = sample.distance;
            }
            (true, Some(_)) => last_open = sample.distance,
            (false, Some(start)) => {
                push_zone(&mut zones, start, last_open, min_length_m);
                open_from = None;
            }
            (false, None) => {}
        }
    }
    if let Some(start) = open_from {
        push_zone(&mut zones, start, last_open, min_length_m);
    }
    zones
}

fn push_zone(zones: &mut Vec<DistanceRange>, start: f64, end: f64, min_length_m: f64) {
    let zone = DistanceRange::new(start, end);
    if zone.length() > min_length_m {
        zones.push(zone);
    }
}
