//! RC-tree interconnect timing for the Elmore static timer.
//!
//! This crate models the resistive-capacitive network of one net between its
//! driver and its receivers and computes, for every analysis corner, the load
//! seen by the driver, the Elmore delay to each receiver and the slew
//! degradation along the wire. Evaluation is linear in the size of the tree.
//!
//! # Usage
//!
//! ```
//! use elmore_common::{Corner, Terminal};
//! use elmore_rct::{CapElement, Net, ParasiticNet, ResElement};
//!
//! let mut net = Net::new("n1");
//! net.set_root(Terminal::new("drv"));
//! net.append(Terminal::with_cap("sink", 1.0));
//!
//! let mut payload = ParasiticNet::new("n1");
//! payload.caps.push(CapElement::ground("drv", 0.0));
//! payload.ress.push(ResElement::new("drv", "sink", 100.0));
//! net.attach(payload);
//!
//! let delay = net.delay("sink", Corner::REPRESENTATIVE).unwrap();
//! assert_eq!(delay, 100.0);
//! ```
//!
//! # Architecture
//!
//! - [`node`] — RC nodes and their per-corner results
//! - [`edge`] — resistive segments
//! - [`tree`] — the RC tree and its evaluation sweeps
//! - [`parasitics`] — parsed parasitic payloads and tree construction
//! - [`net`] — per-net placeholder/tree dispatch with lazy recompute
//! - [`report`] — serializable per-sink timing reports

#![warn(missing_docs)]

pub mod edge;
pub mod error;
pub mod ids;
pub mod net;
pub mod node;
pub mod parasitics;
pub mod report;
pub mod tree;

pub use edge::RctEdge;
pub use error::{LookupKind, RctError, RctResult};
pub use ids::{RctEdgeId, RctNodeId};
pub use net::{update_nets, EmptyRct, Net, RcModel};
pub use node::RctNode;
pub use parasitics::{build_rct, CapElement, ParasiticNet, ResElement};
pub use report::{NetReport, SinkTiming};
pub use tree::{RcTree, StructureIssue};
