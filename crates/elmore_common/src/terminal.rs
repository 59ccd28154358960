//! Terminals: the driver and receiver pins a net connects.

use crate::corner::{Corner, CornerGrid};
use serde::{Deserialize, Serialize};

/// A pin attached to a net.
///
/// Terminals are owned by the surrounding timing engine. A net only records
/// the terminal's identity (its name, which must match the RC-tree node it
/// attaches to) and the pin capacitance it contributes to the net's load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    /// Hierarchical pin name (e.g., "u1:A", "out").
    pub name: String,
    /// Pin input capacitance per corner.
    #[serde(default)]
    pub cap: CornerGrid<f64>,
}

impl Terminal {
    /// Creates a terminal with zero pin capacitance.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cap: CornerGrid::default(),
        }
    }

    /// Creates a terminal with the same pin capacitance at every corner.
    pub fn with_cap(name: impl Into<String>, cap: f64) -> Self {
        Self {
            name: name.into(),
            cap: CornerGrid::splat(cap),
        }
    }

    /// Returns the pin capacitance at `corner`.
    pub fn cap(&self, corner: Corner) -> f64 {
        self.cap[corner]
    }
}
