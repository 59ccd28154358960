//! Configuration types deserialized from `elmore.toml`.

use elmore_common::Corner;
use serde::Deserialize;

/// The complete analysis configuration.
///
/// Every section is optional; a missing file section takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Stimulus and reporting options.
    #[serde(default)]
    pub analysis: AnalysisSection,
    /// Parasitic derating factors.
    #[serde(default)]
    pub derate: DerateConfig,
}

/// The `[analysis]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Input slew applied at each net's driver when none is given on the
    /// command line.
    pub input_slew: f64,
    /// Corners included in reports.
    pub corners: Vec<Corner>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            input_slew: 0.0,
            corners: Corner::ALL.to_vec(),
        }
    }
}

/// The `[derate]` section: multiplicative factors applied to every node
/// capacitance and every segment resistance after a tree is built.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DerateConfig {
    /// Capacitance factor.
    pub capacitance: f64,
    /// Resistance factor.
    pub resistance: f64,
}

impl Default for DerateConfig {
    fn default() -> Self {
        Self {
            capacitance: 1.0,
            resistance: 1.0,
        }
    }
}

impl DerateConfig {
    /// Returns `true` if both factors are exactly one.
    pub fn is_identity(&self) -> bool {
        self.capacitance == 1.0 && self.resistance == 1.0
    }
}
