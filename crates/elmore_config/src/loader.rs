//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::AnalysisConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE: &str = "elmore.toml";

/// Loads and validates an `elmore.toml` configuration from a directory.
///
/// Reads `<dir>/elmore.toml`, parses it, and validates its values.
pub fn load_config(dir: &Path) -> Result<AnalysisConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates an `elmore.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<AnalysisConfig, ConfigError> {
    let config: AnalysisConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that derate factors are finite and non-negative, the input slew is
/// finite, and at least one corner is selected.
pub fn validate_config(config: &AnalysisConfig) -> Result<(), ConfigError> {
    for (key, value) in [
        ("derate.capacitance", config.derate.capacitance),
        ("derate.resistance", config.derate.resistance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "{key} must be finite and non-negative, got {value}"
            )));
        }
    }
    if !config.analysis.input_slew.is_finite() {
        return Err(ConfigError::ValidationError(format!(
            "analysis.input_slew must be finite, got {}",
            config.analysis.input_slew
        )));
    }
    if config.analysis.corners.is_empty() {
        return Err(ConfigError::ValidationError(
            "analysis.corners must name at least one corner".to_string(),
        ));
    }
    Ok(())
}
