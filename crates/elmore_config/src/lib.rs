//! Parsing and validation of `elmore.toml` analysis configuration files.
//!
//! This crate reads the analysis configuration and produces a strongly-typed
//! [`AnalysisConfig`] holding the default input slew, the corners to report
//! and the derating factors applied to parasitics.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, validate_config, CONFIG_FILE};
pub use types::*;
