//! # Config Loader
//!
//! Comparison configuration loading.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `ComparisonConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("comparison.toml")).unwrap();
//! println!("threshold: {} km/h", config.delta_threshold);
//! ```

mod parser;
mod validator;

pub use contracts::ComparisonConfig;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::MapError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<ComparisonConfig, MapError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<ComparisonConfig, MapError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(config: &ComparisonConfig) -> Result<String, MapError> {
        toml::to_string_pretty(config)
            .map_err(|e| MapError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize to JSON string
    pub fn to_json(config: &ComparisonConfig) -> Result<String, MapError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| MapError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, MapError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| MapError::config_parse("cannot determine file format from extension"))?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| MapError::config_parse(format!("unsupported config format: .{ext}")))
    }

    fn read_file(path: &Path) -> Result<String, MapError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
