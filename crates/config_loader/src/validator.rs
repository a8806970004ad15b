//! Config validation
//!
//! Rules:
//! - delta_threshold finite and >= 0
//! - num_points >= 1
//! - lighten_factor within [0, 1]
//! - drs_min_zone_m finite and >= 0

use contracts::{ComparisonConfig, MapError};
use validator::Validate;

/// Validate a `ComparisonConfig`
///
/// Returns the first violation found, or Ok(()).
pub fn validate(config: &ComparisonConfig) -> Result<(), MapError> {
    validate_finite(config)?;
    validate_ranges(config)?;
    Ok(())
}

/// Range rules declared on the struct
fn validate_ranges(config: &ComparisonConfig) -> Result<(), MapError> {
    let Err(errors) = config.validate() else {
        return Ok(());
    };
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    match fields.first() {
        Some(&(field, errs)) => {
            let field: &str = field;
            let message = errs
                .first()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => e.code.to_string(),
                })
                .unwrap_or_else(|| "invalid value".to_string());
            Err(MapError::config_validation(
                field,
                format!("{message}, got {}", field_value(config, field)),
            ))
        }
        None => Err(MapError::config_validation("config", errors.to_string())),
    }
}

/// Range checks let infinities through
fn validate_finite(config: &ComparisonConfig) -> Result<(), MapError> {
    let checks = [
        ("delta_threshold", config.delta_threshold),
        ("lighten_factor", config.lighten_factor),
        ("drs_min_zone_m", config.drs_min_zone_m),
    ];
    for (field, value) in checks {
        if !value.is_finite() {
            return Err(MapError::config_validation(
                field,
                format!("must be finite, got {value}"),
            ));
        }
    }
    Ok(())
}

fn field_value(config: &ComparisonConfig, field: &str) -> String {
    match field {
        "delta_threshold" => config.delta_threshold.to_string(),
        "num_points" => config.num_points.to_string(),
        "lighten_factor" => config.lighten_factor.to_string(),
        "drs_min_zone_m" => config.drs_min_zone_m.to_string(),
        _ => "?".to_string(),
    }
}
