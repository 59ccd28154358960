//! Timing report types for a net's sinks.
//!
//! A [`NetReport`] is a serializable snapshot of a net's driver load and the
//! delay and slew at each receiving terminal, for a chosen set of corners.

use crate::error::RctResult;
use crate::net::Net;
use elmore_common::{Corner, CornerGrid};
use serde::{Deserialize, Serialize};

/// Interconnect timing at one sink for one corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinkTiming {
    /// The receiving terminal name.
    pub terminal: String,
    /// The analysis corner.
    pub corner: Corner,
    /// Elmore delay from the driver.
    pub delay: f64,
    /// Output slew for the report's input slew.
    pub slew: f64,
}

/// Interconnect timing summary for one net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetReport {
    /// The net name.
    pub net: String,
    /// The driver terminal name, if set.
    pub driver: Option<String>,
    /// Input slew applied at the driver.
    pub input_slew: f64,
    /// Total load seen by the driver.
    pub load: CornerGrid<f64>,
    /// Per-sink, per-corner timing in terminal attachment order.
    pub sinks: Vec<SinkTiming>,
}

impl NetReport {
    /// Returns the sink entry with the worst (largest) delay.
    pub fn worst_delay(&self) -> Option<&SinkTiming> {
        self.sinks
            .iter()
            .max_by(|a, b| a.delay.total_cmp(&b.delay))
    }
}

impl Net {
    /// Evaluates the net if needed and reports every non-driver terminal at
    /// each of `corners`.
    pub fn report(&mut self, input_slew: f64, corners: &[Corner]) -> RctResult<NetReport> {
        let mut load: CornerGrid<f64> = CornerGrid::default();
        for corner in Corner::all() {
            load[corner] = self.load(corner)?;
        }

        let driver = self.root().map(|t| t.name.clone());
        let sinks: Vec<String> = self
            .terminals()
            .iter()
            .filter(|t| Some(&t.name) != driver.as_ref())
            .map(|t| t.name.clone())
            .collect();

        let mut timings = Vec::with_capacity(sinks.len() * corners.len());
        for terminal in sinks {
            for &corner in corners {
                timings.push(SinkTiming {
                    delay: self.delay(&terminal, corner)?,
                    slew: self.slew(&terminal, corner, input_slew)?,
                    terminal: terminal.clone(),
                    corner,
                });
            }
        }

        Ok(NetReport {
            net: self.name().to_string(),
            driver,
            input_slew,
            load,
            sinks: timings,
        })
    }
}
