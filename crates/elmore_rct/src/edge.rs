//! RC-tree edges: resistive wire segments between two nodes.

use crate::ids::RctNodeId;
use serde::{Deserialize, Serialize};

/// A directed parent→child wire segment with a corner-independent resistance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RctEdge {
    pub(crate) from: RctNodeId,
    pub(crate) to: RctNodeId,
    pub(crate) res: f64,
}

impl RctEdge {
    pub(crate) fn new(from: RctNodeId, to: RctNodeId, res: f64) -> Self {
        Self { from, to, res }
    }

    /// Returns the upstream (parent) node.
    pub fn from(&self) -> RctNodeId {
        self.from
    }

    /// Returns the downstream (child) node.
    pub fn to(&self) -> RctNodeId {
        self.to
    }

    /// Returns the segment resistance.
    pub fn res(&self) -> f64 {
        self.res
    }

    /// Sets the segment resistance.
    pub fn set_res(&mut self, res: f64) {
        self.res = res;
    }

    /// Multiplies the resistance by `factor`. Negative factors are not rejected.
    pub fn scale_resistance(&mut self, factor: f64) {
        self.res *= factor;
    }
}
