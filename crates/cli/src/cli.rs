//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use contracts::{GridDomain, LapSelector};
use std::path::PathBuf;

/// Circuit Map - driver-vs-driver speed delta maps
#[derive(Parser, Debug)]
#[command(
    name = "circuit-map",
    author,
    version,
    about = "Driver-vs-driver circuit speed delta maps",
    long_about = "Aligns two drivers' lap telemetry on a shared distance grid, \n\
                  segments the track by who is faster, and emits a colored \n\
                  circuit map (segments, hover data, legend) as JSON."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "CIRCUIT_MAP_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "compact",
        global = true,
        env = "CIRCUIT_MAP_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two drivers and emit the circuit map
    Compare(CompareArgs),

    /// Validate a comparison config file
    Validate(ValidateArgs),

    /// Display session drivers, laps and team colors
    Info(InfoArgs),
}

/// Arguments for the `compare` command
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Path to the session file (JSON)
    #[arg(short, long, env = "CIRCUIT_MAP_SESSION")]
    pub session: PathBuf,

    /// First driver (e.g. VER)
    #[arg(long, env = "CIRCUIT_MAP_DRIVER1")]
    pub driver1: String,

    /// Second driver (e.g. LEC)
    #[arg(long, env = "CIRCUIT_MAP_DRIVER2")]
    pub driver2: String,

    /// Lap to compare: `fastest` or a lap number
    #[arg(short, long, default_value = "fastest")]
    pub lap: LapSelector,

    /// Comparison config file (TOML or JSON)
    #[arg(short, long, env = "CIRCUIT_MAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the equal-pace band (km/h)
    #[arg(long, env = "CIRCUIT_MAP_DELTA_THRESHOLD")]
    pub delta_threshold: Option<f64>,

    /// Override the grid resolution
    #[arg(long, env = "CIRCUIT_MAP_NUM_POINTS")]
    pub num_points: Option<usize>,

    /// Override the teammate lighten factor
    #[arg(long)]
    pub lighten_factor: Option<f64>,

    /// Override the grid domain
    #[arg(long, value_enum)]
    pub grid_domain: Option<GridDomainArg>,

    /// Write the map to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Print delta statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Resolve config and drivers, then exit without assembling
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "circuit_map.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to the session file (JSON)
    #[arg(short, long, env = "CIRCUIT_MAP_SESSION")]
    pub session: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// List every lap with its time and sample count
    #[arg(long)]
    pub laps: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

/// Grid domain choice
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GridDomainArg {
    /// Span both drivers' laps
    Union,
    /// Only the distance both drivers cover
    Intersection,
}

impl From<GridDomainArg> for GridDomain {
    fn from(arg: GridDomainArg) -> Self {
        match arg {
            GridDomainArg::Union => Self::Union,
            GridDomainArg::Intersection => Self::Intersection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compare() {
        let cli = Cli::try_parse_from([
            "circuit-map",
            "compare",
            "--session",
            "bahrain.json",
            "--driver1",
            "VER",
            "--driver2",
            "LEC",
            "--lap",
            "12",
            "--delta-threshold",
            "1.5",
        ])
        .unwrap();

        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.driver1, "VER");
        assert_eq!(args.lap, LapSelector::Number(12));
        assert_eq!(args.delta_threshold, Some(1.5));
    }

    #[test]
    fn test_lap_defaults_to_fastest() {
        let cli = Cli::try_parse_from([
            "circuit-map", "compare", "-s", "s.json", "--driver1", "HAM", "--driver2", "RUS",
        ])
        .unwrap();
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.lap, LapSelector::Fastest);
    }

    #[test]
    fn test_rejects_bad_lap() {
        let result = Cli::try_parse_from([
            "circuit-map",
            "compare",
            "-s",
            "s.json",
            "--driver1",
            "HAM",
            "--driver2",
            "RUS",
            "--lap",
            "best",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["circuit-map", "-q", "-v", "info", "-s", "s.json"]);
        assert!(result.is_err());
    }
}
