//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use session_source::{DriverEntry, JsonSession};
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

/// Session info for JSON output
#[derive(Serialize)]
struct SessionInfo {
    session_id: String,
    drivers: Vec<DriverInfo>,
}

#[derive(Serialize)]
struct DriverInfo {
    code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_color: Option<String>,
    lap_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    fastest_lap: Option<LapInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    laps: Vec<LapInfo>,
}

#[derive(Serialize)]
struct LapInfo {
    lap_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    lap_time_s: Option<f64>,
    samples: usize,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(session = %args.session.display(), "Loading session info");

    if !args.session.exists() {
        return Err(CliError::session_not_found(args.session.display().to_string()).into());
    }

    let session = JsonSession::load_from_path(&args.session)
        .with_context(|| format!("Failed to load session from {}", args.session.display()))?;

    let info = build_session_info(&session, args.laps);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize session info")?;
        println!("{}", json);
    } else {
        print_session_info(&info);
    }

    Ok(())
}

fn build_session_info(session: &JsonSession, with_laps: bool) -> SessionInfo {
    SessionInfo {
        session_id: session.session_id.clone(),
        drivers: session
            .drivers
            .iter()
            .map(|driver| driver_info(driver, with_laps))
            .collect(),
    }
}

fn driver_info(driver: &DriverEntry, with_laps: bool) -> DriverInfo {
    let lap_info = |lap: &session_source::LapRecord| LapInfo {
        lap_number: lap.lap_number,
        lap_time_s: lap.lap_time_s,
        samples: lap.samples.len(),
    };

    DriverInfo {
        code: driver.code.to_string(),
        team: driver.team.clone(),
        team_color: driver.team_color.clone(),
        lap_count: driver.laps.len(),
        fastest_lap: driver.fastest_lap().map(lap_info),
        laps: if with_laps {
            driver.laps.iter().map(lap_info).collect()
        } else {
            Vec::new()
        },
    }
}

/// Seconds as `m:ss.sss`
fn format_lap_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor();
    format!("{}:{:06.3}", minutes as u64, seconds - minutes * 60.0)
}

fn print_session_info(info: &SessionInfo) {
    println!("=== Session: {} ===\n", info.session_id);
    println!("Drivers ({})", info.drivers.len());

    for (i, driver) in info.drivers.iter().enumerate() {
        let is_last = i + 1 == info.drivers.len();
        let prefix = if is_last { "└─" } else { "├─" };
        let child_prefix = if is_last { "   " } else { "│  " };

        println!(
            "   {} {} ({}, color {})",
            prefix,
            driver.code,
            driver.team.as_deref().unwrap_or("unknown team"),
            driver.team_color.as_deref().unwrap_or("default"),
        );

        match &driver.fastest_lap {
            Some(lap) => println!(
                "   {}  ├─ Fastest: lap {} in {}",
                child_prefix,
                lap.lap_number,
                lap.lap_time_s.map(format_lap_time).unwrap_or_default()
            ),
            None => println!("   {}  ├─ Fastest: (no timed lap)", child_prefix),
        }

        if driver.laps.is_empty() {
            println!("   {}  └─ {} laps", child_prefix, driver.lap_count);
            continue;
        }
        println!("   {}  └─ Laps ({}):", child_prefix, driver.lap_count);
        for (j, lap) in driver.laps.iter().enumerate() {
            let lap_prefix = if j + 1 == driver.laps.len() { "└─" } else { "├─" };
            println!(
                "   {}     {} {:>3}  {:>9}  {} samples",
                child_prefix,
                lap_prefix,
                lap.lap_number,
                lap.lap_time_s
                    .map(format_lap_time)
                    .unwrap_or_else(|| "untimed".to_string()),
                lap.samples
            );
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use session_source::{synthetic_driver, synthetic_session, SyntheticLap};

    #[test]
    fn test_format_lap_time() {
        assert_eq!(format_lap_time(89.708), "1:29.708");
        assert_eq!(format_lap_time(65.0), "1:05.000");
        assert_eq!(format_lap_time(42.5), "0:42.500");
    }

    #[test]
    fn test_build_session_info() {
        let session = synthetic_session(
            "synthetic",
            vec![synthetic_driver(
                "NOR",
                Some("#FF8000"),
                &[
                    SyntheticLap::constant(5000.0, 40, 200.0),
                    SyntheticLap::constant(5000.0, 40, 250.0),
                ],
            )],
        );

        let brief = build_session_info(&session, false);
        assert_eq!(brief.drivers[0].lap_count, 2);
        assert!(brief.drivers[0].laps.is_empty());
        assert_eq!(brief.drivers[0].fastest_lap.as_ref().unwrap().lap_number, 2);

        let full = build_session_info(&session, true);
        assert_eq!(full.drivers[0].laps.len(), 2);
        assert_eq!(full.drivers[0].laps[0].samples, 40);
    }
}
