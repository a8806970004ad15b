//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ComparisonConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<ComparisonConfig>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            config: None,
        };
    }

    match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                config: Some(config),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            config: None,
        },
    }
}

/// Legal but probably unintended settings
fn collect_warnings(config: &ComparisonConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.delta_threshold == 0.0 {
        warnings.push("delta_threshold is 0 - every nonzero delta picks a winner".to_string());
    }
    if config.delta_threshold > 20.0 {
        warnings.push(format!(
            "delta_threshold of {} km/h will mark most of the lap as equal pace",
            config.delta_threshold
        ));
    }
    if config.num_points < 50 {
        warnings.push(format!(
            "num_points = {} gives a very coarse track outline",
            config.num_points
        ));
    }
    if config.lighten_factor == 0.0 {
        warnings.push(
            "lighten_factor is 0 - teammates are told apart by darkening only".to_string(),
        );
    }
    if config.drs_min_zone_m == 0.0 {
        warnings.push("drs_min_zone_m is 0 - single-point DRS flickers become zones".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref config) = result.config {
            println!("\n  Delta threshold: {} km/h", config.delta_threshold);
            println!("  Grid points: {}", config.num_points);
            println!("  Grid domain: {:?}", config.grid_domain);
            println!("  Lighten factor: {}", config.lighten_factor);
            println!("  DRS min zone: {} m", config.drs_min_zone_m);
            println!("  Neutral color: {}", config.neutral_color);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
