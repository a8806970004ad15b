//! # Integration Tests
//!
//! Cross-crate and end-to-end tests.
//!
//! Covers:
//! - Full comparisons from synthetic and file-backed sessions
//! - Grid, segment and hover invariants on assembled maps
//! - Error surfacing from every stage

#[cfg(test)]
mod support {
    use contracts::RawSample;
    use session_source::{synthetic_driver, synthetic_session, JsonSession, SyntheticLap};

    /// Straight-line lap with one sample per metre and a speed profile
    pub fn straight_lap(length: usize, speed: impl Fn(usize) -> f64) -> Vec<RawSample> {
        (0..length)
            .map(|i| {
                RawSample::new(i as f64, i as f64, 0.0, speed(i)).with_inputs(100.0, 0.0, 7, 0)
            })
            .collect()
    }

    pub fn wave_lap(phase: f64, base_speed_kmh: f64) -> SyntheticLap {
        SyntheticLap {
            phase,
            base_speed_kmh,
            ..Default::default()
        }
    }

    /// VER and LEC with distinct colors, PER sharing VER's, SAR uncolored
    pub fn grid_session() -> JsonSession {
        synthetic_session(
            "synthetic-gp",
            vec![
                synthetic_driver(
                    "VER",
                    Some("#3671C6"),
                    &[
                        SyntheticLap {
                            drs_zone: Some((1000.0, 2000.0)),
                            ..wave_lap(0.0, 225.0)
                        },
                        wave_lap(0.0, 215.0),
                    ],
                ),
                synthetic_driver("LEC", Some("#E8002D"), &[wave_lap(0.9, 220.0)]),
                synthetic_driver("PER", Some("#3671C6"), &[wave_lap(0.4, 221.0)]),
                synthetic_driver("SAR", None, &[wave_lap(1.7, 218.0)]),
            ],
        )
    }
}

#[cfg(test)]
mod scenario_tests {
    use std::collections::HashMap;

    use circuit_map::{CircuitMapAssembler, DriverTelemetry};
    use contracts::{ComparisonConfig, DriverId, ErrorKind, LapSelector, Rgb, Winner};

    use super::support::straight_lap;

    fn assembler() -> CircuitMapAssembler {
        CircuitMapAssembler::new(ComparisonConfig::default()).unwrap()
    }

    fn colors() -> HashMap<DriverId, String> {
        HashMap::from([
            (DriverId::from("VER"), "#3671C6".to_string()),
            (DriverId::from("LEC"), "#E8002D".to_string()),
        ])
    }

    #[test]
    fn test_constant_faster_driver_owns_the_lap() {
        let map = assembler()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(800, |_| 300.0)),
                &DriverTelemetry::new("LEC", straight_lap(800, |_| 290.0)),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap();

        assert_eq!(map.num_points, 500);
        assert_eq!(map.segments.len(), 1);
        assert_eq!(map.segments[0].winner, Winner::Driver1);
        assert_eq!(map.segments[0].color, map.colors.driver1.resolved_color);
        assert_eq!(map.segments[0].color, "#3671c6".parse::<Rgb>().unwrap());
        assert!((map.segments[0].mean_delta - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_speeds_are_equal_pace() {
        let map = assembler()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(800, |i| 200.0 + (i % 37) as f64)),
                &DriverTelemetry::new("LEC", straight_lap(800, |i| 200.0 + (i % 37) as f64)),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap();

        assert_eq!(map.segments.len(), 1);
        assert_eq!(map.segments[0].winner, Winner::Equal);
        assert_eq!(map.segments[0].color, Rgb::NEUTRAL);
        assert_eq!(map.winner_shares(), (0.0, 0.0, 1.0));
    }

    #[test]
    fn test_one_point_grid_is_equal_everywhere() {
        let config = ComparisonConfig {
            num_points: 1,
            ..Default::default()
        };
        let map = CircuitMapAssembler::new(config)
            .unwrap()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(500, |_| 300.0)),
                &DriverTelemetry::new("LEC", straight_lap(500, |_| 290.0)),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap();

        assert_eq!(map.num_points, 1);
        assert_eq!(map.segments.len(), 1);
        assert_eq!(map.segments[0].winner, Winner::Equal);
        assert_eq!(map.segments[0].color, Rgb::NEUTRAL);
        assert_eq!(map.deltas[0].delta, 10.0);
        assert_eq!(map.deltas[0].winner, Winner::Equal);
        assert_eq!(map.hover[0].winner, Winner::Equal);
        assert_eq!(map.hover[0].value("winner"), Some("Equal"));
        assert_eq!(map.winner_shares(), (0.0, 0.0, 1.0));

        let summary = observability::DeltaStatsAggregator::from_map(&map).summary();
        assert_eq!(summary.wins, [0, 0, 1]);
    }

    #[test]
    fn test_lead_change_at_index_100() {
        // 500 samples at 1 m spacing -> grid[i] == i
        let map = assembler()
            .assemble(
                &DriverTelemetry::new(
                    "VER",
                    straight_lap(500, |i| if i < 100 { 300.0 } else { 280.0 }),
                ),
                &DriverTelemetry::new("LEC", straight_lap(500, |_| 290.0)),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap();

        assert_eq!(map.segments.len(), 2);
        assert_eq!((map.segments[0].start, map.segments[0].end), (0, 100));
        assert_eq!((map.segments[1].start, map.segments[1].end), (100, 500));
        assert_eq!(map.segments[0].winner, Winner::Driver1);
        assert_eq!(map.segments[1].winner, Winner::Driver2);
        // polylines share the boundary point
        assert_eq!(map.segments[0].points.len(), 101);
        assert_eq!(map.segments[0].points[100], map.segments[1].points[0]);
        assert_eq!(map.segments[1].points.len(), 400);
    }

    #[test]
    fn test_all_nan_speed_is_empty_data() {
        let err = assembler()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(500, |_| 300.0)),
                &DriverTelemetry::new("LEC", straight_lap(500, |_| f64::NAN)),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyData);
        assert!(err.to_string().contains("LEC"));
    }

    #[test]
    fn test_disjoint_laps_are_invalid_range() {
        let mut far = straight_lap(500, |_| 290.0);
        for sample in &mut far {
            sample.distance += 10_000.0;
        }
        let err = assembler()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(500, |_| 300.0)),
                &DriverTelemetry::new("LEC", far),
                LapSelector::Fastest,
                &colors(),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_legend_and_title() {
        let map = assembler()
            .assemble(
                &DriverTelemetry::new("VER", straight_lap(300, |_| 300.0)),
                &DriverTelemetry::new("LEC", straight_lap(300, |_| 290.0)),
                LapSelector::Number(3),
                &colors(),
            )
            .unwrap();

        assert_eq!(map.title, "Circuit Map – VER vs LEC");
        let labels: Vec<&str> = map.legend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["VER faster", "LEC faster", "Equal pace"]);
        assert_eq!(map.legend[2].color, Rgb::NEUTRAL);
        assert_eq!(map.lap, LapSelector::Number(3));
    }
}

#[cfg(test)]
mod session_tests {
    use std::sync::Arc;

    use circuit_map::{cached_assemble, CircuitMapAssembler, InMemoryMapCache};
    use contracts::{
        ComparisonConfig, DriverId, ErrorKind, GridDomain, LapSelector, Rgb, TelemetryProvider,
    };
    use session_source::JsonSession;

    use super::support::grid_session;

    fn compare(
        session: &JsonSession,
        driver1: &str,
        driver2: &str,
        lap: LapSelector,
        config: ComparisonConfig,
    ) -> Result<contracts::CircuitMap, contracts::MapError> {
        CircuitMapAssembler::new(config)?.assemble_from_session(
            session,
            session,
            &DriverId::from(driver1),
            &DriverId::from(driver2),
            lap,
        )
    }

    #[test]
    fn test_config_text_drives_assembly() {
        let config = config_loader::ConfigLoader::load_from_str(
            "delta_threshold = 3.0\nnum_points = 250\ndrs_min_zone_m = 2000.0\n",
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();
        let map = compare(&grid_session(), "VER", "LEC", LapSelector::Number(1), config).unwrap();

        assert_eq!(map.num_points, 250);
        assert_eq!(map.delta_threshold, 3.0);
        // the 1 km zone is shorter than the configured minimum
        assert!(map.drs_zones.driver1.is_empty());
    }

    #[test]
    fn test_teammates_get_distinct_colors() {
        let map = compare(
            &grid_session(),
            "VER",
            "PER",
            LapSelector::Fastest,
            ComparisonConfig::default(),
        )
        .unwrap();

        assert!(map.colors.driver1.is_teammate_pair);
        assert_eq!(map.colors.driver1.base_color, map.colors.driver2.base_color);
        assert_ne!(
            map.colors.driver1.resolved_color,
            map.colors.driver2.resolved_color
        );
    }

    #[test]
    fn test_missing_team_color_falls_back() {
        let map = compare(
            &grid_session(),
            "SAR",
            "LEC",
            LapSelector::Fastest,
            ComparisonConfig::default(),
        )
        .unwrap();

        assert!(map.colors.driver1.fallback);
        assert_eq!(map.colors.driver1.resolved_color, Rgb::DRIVER1_DEFAULT);
        assert!(!map.colors.driver2.fallback);
    }

    #[test]
    fn test_unknown_driver_and_lap() {
        let session = grid_session();
        let err = compare(&session, "VER", "HAM", LapSelector::Fastest, Default::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DriverNotFound);

        let err = compare(&session, "VER", "LEC", LapSelector::Number(7), Default::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingTelemetry);
    }

    #[test]
    fn test_lap_selection_changes_the_map() {
        let session = grid_session();
        let fastest =
            compare(&session, "VER", "LEC", LapSelector::Fastest, Default::default()).unwrap();
        let lap2 =
            compare(&session, "VER", "LEC", LapSelector::Number(2), Default::default()).unwrap();

        // lap 1 is the faster of VER's laps
        let lap1 =
            compare(&session, "VER", "LEC", LapSelector::Number(1), Default::default()).unwrap();
        assert_eq!(fastest.deltas, lap1.deltas);
        assert_ne!(fastest.deltas, lap2.deltas);
    }

    #[test]
    fn test_drs_zones_reported() {
        let map = compare(
            &grid_session(),
            "VER",
            "LEC",
            LapSelector::Number(1),
            ComparisonConfig::default(),
        )
        .unwrap();

        assert_eq!(map.drs_zones.driver1.len(), 1);
        // grid points snap to the nearest raw sample's DRS code
        let zone = &map.drs_zones.driver1[0];
        assert!((zone.start - 1000.0).abs() < 15.0);
        assert!((zone.end - 2000.0).abs() < 15.0);
        assert!(map.drs_zones.driver2.is_empty());

        let hover = &map.hover[150];
        assert!(hover.distance > 1000.0 && hover.distance < 2000.0);
        assert_eq!(hover.value("driver1.drs"), Some("Active"));
        assert_eq!(hover.value("driver2.drs"), Some("Inactive"));
    }

    #[test]
    fn test_grid_domain_controls_clamping() {
        let mut session = grid_session();
        session.drivers[1] = session_source::synthetic_driver(
            "LEC",
            Some("#E8002D"),
            &[session_source::SyntheticLap {
                length_m: 5200.0,
                ..Default::default()
            }],
        );

        let union =
            compare(&session, "VER", "LEC", LapSelector::Fastest, Default::default()).unwrap();
        assert_eq!(union.span.end, 5200.0);
        assert!(union.reports[0].clamped_points > 0);
        assert_eq!(union.reports[1].clamped_points, 0);

        let config = ComparisonConfig {
            grid_domain: GridDomain::Intersection,
            ..Default::default()
        };
        let intersection = compare(&session, "VER", "LEC", LapSelector::Fastest, config).unwrap();
        assert_eq!(intersection.span.end, 5000.0);
        assert_eq!(intersection.reports[0].clamped_points, 0);
        assert_eq!(intersection.reports[1].clamped_points, 0);
    }

    #[test]
    fn test_session_file_round_trip() {
        let session = grid_session();
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(file.path(), session.to_json().unwrap()).unwrap();

        let loaded = JsonSession::load_from_path(file.path()).unwrap();
        assert_eq!(loaded.session_id, "synthetic-gp");
        assert_eq!(loaded.drivers(), session.drivers());

        let from_file =
            compare(&loaded, "VER", "LEC", LapSelector::Fastest, Default::default()).unwrap();
        let in_memory =
            compare(&session, "VER", "LEC", LapSelector::Fastest, Default::default()).unwrap();
        assert_eq!(from_file.segments.len(), in_memory.segments.len());
    }

    #[test]
    fn test_cache_wraps_assembler() {
        let session = grid_session();
        let assembler = CircuitMapAssembler::new(ComparisonConfig::default()).unwrap();
        let cache = InMemoryMapCache::new(8);
        let (ver, lec) = (DriverId::from("VER"), DriverId::from("LEC"));

        let build = || {
            assembler.assemble_from_session(&session, &session, &ver, &lec, LapSelector::Fastest)
        };
        let key = assembler.cache_key(&session.session_id, &ver, &lec, LapSelector::Fastest);
        let hash = key.content_hash();
        let first = cached_assemble(&cache, key.clone(), build).unwrap();
        let second = cached_assemble(&cache, key, || unreachable!("cached")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let swapped = assembler.cache_key(&session.session_id, &lec, &ver, LapSelector::Fastest);
        assert_ne!(swapped.content_hash(), hash);
    }

    #[tokio::test]
    async fn test_parallel_fetch_matches_sequential() {
        let session = Arc::new(grid_session());
        let fetch = |driver: &'static str| {
            let session = Arc::clone(&session);
            tokio::task::spawn_blocking(move || {
                circuit_map::fetch_telemetry(
                    session.as_ref(),
                    &DriverId::from(driver),
                    LapSelector::Fastest,
                )
            })
        };
        let (ver, lec) = tokio::join!(fetch("VER"), fetch("LEC"));
        let (ver, lec) = (ver.unwrap().unwrap(), lec.unwrap().unwrap());

        let assembler = CircuitMapAssembler::new(ComparisonConfig::default()).unwrap();
        let parallel = assembler
            .assemble(&ver, &lec, LapSelector::Fastest, session.as_ref())
            .unwrap();
        let sequential = compare(
            &session,
            "VER",
            "LEC",
            LapSelector::Fastest,
            Default::default(),
        )
        .unwrap();
        assert_eq!(parallel, sequential);
    }
}

#[cfg(test)]
mod invariant_tests {
    use alignment::TelemetryAligner;
    use circuit_map::CircuitMapAssembler;
    use contracts::{CircuitMap, ComparisonConfig, DriverId, LapSelector};
    use observability::DeltaStatsAggregator;
    use segmentation::DeltaSegmenter;

    use super::support::{grid_session, wave_lap};

    fn wave_map(config: ComparisonConfig) -> CircuitMap {
        let session = grid_session();
        CircuitMapAssembler::new(config)
            .unwrap()
            .assemble_from_session(
                &session,
                &session,
                &"VER".into(),
                &"LEC".into(),
                LapSelector::Fastest,
            )
            .unwrap()
    }

    #[test]
    fn test_aligned_lengths_and_grid() {
        let aligner = TelemetryAligner::new(321, Default::default());
        let pair = aligner
            .align(
                &DriverId::from("A"),
                &wave_lap(0.0, 220.0).generate(),
                &DriverId::from("B"),
                &wave_lap(0.5, 220.0).generate(),
            )
            .unwrap();

        assert_eq!(pair.grid.len(), 321);
        assert_eq!(pair.driver1.len(), 321);
        assert_eq!(pair.driver2.len(), 321);
        assert_eq!(pair.grid[0], 0.0);
        assert_eq!(pair.grid[320], 5000.0);
        assert!(pair.grid.windows(2).all(|w| w[0] <= w[1]));
        for (i, &d) in pair.grid.iter().enumerate() {
            assert_eq!(pair.driver1.samples[i].distance, d);
            assert_eq!(pair.driver2.samples[i].distance, d);
        }
    }

    #[test]
    fn test_segments_partition_the_grid() {
        let map = wave_map(ComparisonConfig::default());
        assert!(map.segments.len() > 2);

        let mut next = 0;
        for segment in &map.segments {
            assert_eq!(segment.start, next);
            assert!(segment.end > segment.start);
            next = segment.end;
        }
        assert_eq!(next, map.num_points);
        assert!(map
            .segments
            .windows(2)
            .all(|w| w[0].winner != w[1].winner));

        for segment in &map.segments {
            assert!(map.deltas[segment.start..segment.end]
                .iter()
                .all(|p| p.winner == segment.winner));
        }
    }

    #[test]
    fn test_hover_parallels_grid() {
        let map = wave_map(ComparisonConfig::default());
        assert_eq!(map.hover.len(), map.num_points);
        assert_eq!(map.deltas.len(), map.num_points);

        for (record, point) in map.hover.iter().zip(&map.deltas) {
            assert_eq!(record.index, point.index);
            assert_eq!(record.winner, point.winner);
            assert!(record.text.starts_with("Distance: "));
            assert_eq!(record.text.matches("<br>").count(), 6);
        }
    }

    #[test]
    fn test_assembly_is_byte_identical() {
        let first = serde_json::to_string(&wave_map(ComparisonConfig::default())).unwrap();
        let second = serde_json::to_string(&wave_map(ComparisonConfig::default())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_never_adds_wins() {
        let loose = wave_map(ComparisonConfig {
            delta_threshold: 0.5,
            ..Default::default()
        });
        let tight = wave_map(ComparisonConfig {
            delta_threshold: 8.0,
            ..Default::default()
        });

        let (l1, l2, _) = loose.winner_shares();
        let (t1, t2, _) = tight.winner_shares();
        assert!(t1 <= l1 && t2 <= l2);
    }

    #[test]
    fn test_segmenter_is_idempotent_on_map_deltas() {
        let map = wave_map(ComparisonConfig::default());
        let segmenter = DeltaSegmenter::new(map.delta_threshold);
        let first = segmenter.segments(&map.deltas);
        let second = segmenter.segments(&map.deltas);
        assert_eq!(first, second);
        assert_eq!(first.len(), map.segments.len());
    }

    #[test]
    fn test_stats_match_winner_shares() {
        let map = wave_map(ComparisonConfig::default());
        let summary = DeltaStatsAggregator::from_map(&map).summary();
        let (s1, s2, eq) = map.winner_shares();

        assert_eq!(summary.points as usize, map.num_points);
        assert_eq!(summary.wins.iter().sum::<u64>() as usize, map.num_points);
        assert!((summary.win_rates[0] / 100.0 - s1).abs() < 1e-9);
        assert!((summary.win_rates[1] / 100.0 - s2).abs() < 1e-9);
        assert!((summary.win_rates[2] / 100.0 - eq).abs() < 1e-9);
        assert!(summary.to_string().starts_with("=== Delta Summary: VER vs LEC ==="));
    }
}
