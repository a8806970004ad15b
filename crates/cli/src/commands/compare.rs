//! `compare` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::{ComparisonConfig, DriverId};
use session_source::JsonSession;
use tracing::info;

use crate::cli::CompareArgs;
use crate::error::CliError;
use crate::pipeline::{Comparison, ComparisonRequest};

/// Execute the `compare` command
pub async fn run_compare(args: &CompareArgs) -> Result<()> {
    info!(session = %args.session.display(), "Loading session");

    if !args.session.exists() {
        return Err(CliError::session_not_found(args.session.display().to_string()).into());
    }

    let config = resolve_config(args)?;
    let session = JsonSession::load_from_path(&args.session)
        .with_context(|| format!("Failed to load session from {}", args.session.display()))?;

    let request = ComparisonRequest {
        driver1: DriverId::from(args.driver1.trim()),
        driver2: DriverId::from(args.driver2.trim()),
        lap: args.lap,
        config,
    };
    let comparison = Comparison::new(Arc::new(session), request)?;

    if args.dry_run {
        info!("Dry run mode - configuration resolved, exiting");
        print_request_summary(comparison.request())?;
        return Ok(());
    }

    let (map, stats) = comparison.run().await?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&map)
    } else {
        serde_json::to_string(&map)
    }
    .context("Failed to serialize circuit map")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write map to {}", path.display()))?;
            info!(output = %path.display(), "Circuit map written");
        }
        None => println!("{}", json),
    }

    if args.stats {
        eprint!("{}", stats.render());
    }

    Ok(())
}

/// Config file (or defaults) with CLI overrides applied, validated
fn resolve_config(args: &CompareArgs) -> Result<ComparisonConfig> {
    let mut config = match &args.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::config_not_found(path.display().to_string()).into());
            }
            config_loader::ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => ComparisonConfig::default(),
    };

    apply_overrides(&mut config, args);
    config_loader::validate(&config).context("Invalid comparison settings")?;
    Ok(config)
}

fn apply_overrides(config: &mut ComparisonConfig, args: &CompareArgs) {
    if let Some(threshold) = args.delta_threshold {
        info!(delta_threshold = threshold, "Overriding delta threshold from CLI");
        config.delta_threshold = threshold;
    }
    if let Some(points) = args.num_points {
        info!(num_points = points, "Overriding grid resolution from CLI");
        config.num_points = points;
    }
    if let Some(factor) = args.lighten_factor {
        info!(lighten_factor = factor, "Overriding lighten factor from CLI");
        config.lighten_factor = factor;
    }
    if let Some(domain) = args.grid_domain {
        info!(grid_domain = ?domain, "Overriding grid domain from CLI");
        config.grid_domain = domain.into();
    }
}

/// Print the resolved comparison for dry-run mode
fn print_request_summary(request: &ComparisonRequest) -> Result<()> {
    println!("\n=== Comparison Summary ===\n");
    println!("Drivers: {} vs {}", request.driver1, request.driver2);
    println!("Lap: {}", request.lap);
    println!("\nSettings:");
    let toml = config_loader::ConfigLoader::to_toml(&request.config)
        .context("Failed to render settings")?;
    for line in toml.lines().filter(|l| !l.is_empty()) {
        println!("  {}", line);
    }
    println!();
    Ok(())
}
