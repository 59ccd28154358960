//! RC-tree nodes: electrical junctions carrying lumped capacitance.

use crate::ids::RctEdgeId;
use elmore_common::{Corner, CornerGrid, Terminal};
use serde::{Deserialize, Serialize};

/// An electrical junction in an RC tree.
///
/// A node owns its lumped (wire) capacitance and, once the tree has been
/// evaluated, the per-corner timing quantities derived for it. Every accessor
/// is O(1). Before the first evaluation all derived values read as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RctNode {
    pub(crate) name: String,
    pub(crate) ncap: CornerGrid<f64>,
    pub(crate) load: CornerGrid<f64>,
    pub(crate) delay: CornerGrid<f64>,
    pub(crate) ldelay: CornerGrid<f64>,
    pub(crate) beta: CornerGrid<f64>,
    pub(crate) impulse: CornerGrid<f64>,
    pub(crate) fanin: Option<RctEdgeId>,
    pub(crate) fanout: Vec<RctEdgeId>,
    pub(crate) terminal: Option<Terminal>,
}

impl RctNode {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ncap: CornerGrid::default(),
            load: CornerGrid::default(),
            delay: CornerGrid::default(),
            ldelay: CornerGrid::default(),
            beta: CornerGrid::default(),
            impulse: CornerGrid::default(),
            fanin: None,
            fanout: Vec::new(),
            terminal: None,
        }
    }

    /// Returns the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node's own lumped wire capacitance.
    pub fn ncap(&self, corner: Corner) -> f64 {
        self.ncap[corner]
    }

    /// Returns the capacitance seen at this node: its wire capacitance plus
    /// the pin capacitance of the terminal bound to it, if any.
    pub fn cap(&self, corner: Corner) -> f64 {
        match &self.terminal {
            Some(t) => self.ncap[corner] + t.cap(corner),
            None => self.ncap[corner],
        }
    }

    /// Returns the total capacitance of the subtree rooted at this node.
    pub fn load(&self, corner: Corner) -> f64 {
        self.load[corner]
    }

    /// Returns the Elmore delay from the tree root to this node.
    pub fn delay(&self, corner: Corner) -> f64 {
        self.delay[corner]
    }

    /// Returns the second central moment of the impulse response at this node.
    pub fn impulse(&self, corner: Corner) -> f64 {
        self.impulse[corner]
    }

    /// Returns the output slew at this node for a given input slew at the root.
    ///
    /// Combines the input slew with the response spread in quadrature:
    /// `sqrt(input_slew² + impulse)`. A negative input slew keeps its sign.
    pub fn slew(&self, corner: Corner, input_slew: f64) -> f64 {
        let spread = self.impulse[corner].max(0.0);
        let slew = (input_slew * input_slew + spread).sqrt();
        if input_slew < 0.0 {
            -slew
        } else {
            slew
        }
    }

    /// Returns the incoming edge, or `None` at the root.
    pub fn fanin(&self) -> Option<RctEdgeId> {
        self.fanin
    }

    /// Returns the outgoing edges.
    pub fn fanout(&self) -> &[RctEdgeId] {
        &self.fanout
    }

    /// Returns the terminal bound to this node, if any.
    pub fn terminal(&self) -> Option<&Terminal> {
        self.terminal.as_ref()
    }

    pub(crate) fn reset_results(&mut self) {
        self.load = CornerGrid::default();
        self.delay = CornerGrid::default();
        self.ldelay = CornerGrid::default();
        self.beta = CornerGrid::default();
        self.impulse = CornerGrid::default();
    }

    pub(crate) fn scale_capacitance(&mut self, factor: f64) {
        self.ncap = self.ncap.map(|c| c * factor);
    }
}
