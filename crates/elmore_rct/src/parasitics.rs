//! Parsed parasitic payloads and their conversion into RC trees.
//!
//! A [`ParasiticNet`] mirrors one `*D_NET` section of a SPEF file after
//! parsing: a list of capacitors (to ground, or coupling to another net) and
//! a list of undirected resistor segments. Parsing the file itself is the job
//! of an upstream reader; this module only consumes the structured result.

use crate::tree::RcTree;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// The extracted parasitics of one net.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParasiticNet {
    /// The net name.
    pub name: String,
    /// Total lumped capacitance reported by the extractor.
    #[serde(default)]
    pub total_cap: f64,
    /// Capacitor elements (`*CAP` section).
    #[serde(default)]
    pub caps: Vec<CapElement>,
    /// Resistor elements (`*RES` section).
    #[serde(default)]
    pub ress: Vec<ResElement>,
}

/// A capacitor from a node of this net to ground or to a node of another net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapElement {
    /// The node of this net.
    pub node: String,
    /// The coupled node on another net, or `None` for a ground capacitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupled: Option<String>,
    /// Capacitance value.
    pub value: f64,
}

/// An undirected resistor between two nodes of this net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResElement {
    /// One endpoint.
    pub a: String,
    /// The other endpoint.
    pub b: String,
    /// Resistance value.
    pub value: f64,
}

impl CapElement {
    /// Creates a ground capacitor.
    pub fn ground(node: impl Into<String>, value: f64) -> Self {
        Self {
            node: node.into(),
            coupled: None,
            value,
        }
    }

    /// Creates a coupling capacitor to a node of another net.
    pub fn coupling(node: impl Into<String>, coupled: impl Into<String>, value: f64) -> Self {
        Self {
            node: node.into(),
            coupled: Some(coupled.into()),
            value,
        }
    }
}

impl ResElement {
    /// Creates a resistor between `a` and `b`.
    pub fn new(a: impl Into<String>, b: impl Into<String>, value: f64) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            value,
        }
    }
}

impl ParasiticNet {
    /// Creates an empty payload for the named net.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the name of the first node mentioned by the payload.
    pub fn first_node(&self) -> Option<&str> {
        self.caps
            .first()
            .map(|c| c.node.as_str())
            .or_else(|| self.ress.first().map(|r| r.a.as_str()))
    }

    /// Returns the sum of all capacitor element values, coupling included.
    ///
    /// For a consistent payload this matches `total_cap`.
    pub fn summed_cap(&self) -> f64 {
        self.caps.iter().map(|c| c.value).sum()
    }

    /// Returns whether the payload mentions a node of the given name.
    pub fn contains_node(&self, name: &str) -> bool {
        self.caps.iter().any(|c| c.node == name)
            || self.ress.iter().any(|r| r.a == name || r.b == name)
    }
}

/// Builds an RC tree from a parasitic payload.
///
/// Capacitors are summed per node; coupling capacitors are grounded onto the
/// node of this net. Resistor segments are oriented breadth-first away from
/// `driver` (or from the payload's first node when `driver` is `None` or not
/// part of the payload). A segment that would close a resistive loop is
/// dropped. Segments not connected to the root are oriented from their own
/// first node and stay unreachable during evaluation.
pub fn build_rct(payload: &ParasiticNet, driver: Option<&str>) -> RcTree {
    let mut tree = RcTree::new();
    let root = driver
        .filter(|d| payload.contains_node(d))
        .or_else(|| payload.first_node());
    let Some(root) = root else {
        return tree;
    };

    let mut order: Vec<&str> = Vec::new();
    let mut caps: HashMap<&str, f64> = HashMap::new();
    for cap in &payload.caps {
        let total = caps.entry(cap.node.as_str()).or_insert_with(|| {
            order.push(cap.node.as_str());
            0.0
        });
        *total += cap.value;
    }
    let coupled = payload.caps.iter().filter(|c| c.coupled.is_some()).count();
    if coupled > 0 {
        tracing::debug!(net = %payload.name, coupled, "grounding coupling capacitors");
    }

    let root_id = tree.insert_node(root, caps.get(root).copied().unwrap_or(0.0));
    for name in order {
        tree.insert_node(name, caps[name]);
    }

    let mut walk = Orientation::new(payload);
    walk.visit_from(root, &mut tree);
    let mut detached = 0usize;
    for (i, res) in payload.ress.iter().enumerate() {
        if !walk.used[i] {
            detached += 1;
            walk.visit_from(res.a.as_str(), &mut tree);
        }
    }

    let dropped = walk.dropped;
    if dropped > 0 {
        tracing::warn!(net = %payload.name, dropped, "dropped resistors closing a loop");
    }
    if detached > 0 {
        tracing::warn!(net = %payload.name, detached, "resistor groups unreachable from driver");
    }

    let summed = payload.summed_cap();
    if payload.total_cap > 0.0 && (summed - payload.total_cap).abs() > 1e-6 * payload.total_cap {
        tracing::debug!(
            net = %payload.name,
            total_cap = payload.total_cap,
            summed,
            "capacitor elements disagree with reported total"
        );
    }

    // Edge insertion may move the root upstream; pin it back to the driver.
    tree.set_root_id(root_id);
    tree
}

/// Breadth-first orientation state over the undirected resistor graph.
struct Orientation<'a> {
    payload: &'a ParasiticNet,
    adjacency: HashMap<&'a str, Vec<usize>>,
    used: Vec<bool>,
    visited: HashSet<&'a str>,
    dropped: usize,
}

impl<'a> Orientation<'a> {
    fn new(payload: &'a ParasiticNet) -> Self {
        let mut adjacency: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, res) in payload.ress.iter().enumerate() {
            adjacency.entry(res.a.as_str()).or_default().push(i);
            adjacency.entry(res.b.as_str()).or_default().push(i);
        }
        Self {
            payload,
            adjacency,
            used: vec![false; payload.ress.len()],
            visited: HashSet::new(),
            dropped: 0,
        }
    }

    fn visit_from(&mut self, start: &'a str, tree: &mut RcTree) {
        let payload = self.payload;
        let mut queue = VecDeque::from([start]);
        self.visited.insert(start);
        while let Some(u) = queue.pop_front() {
            let Some(segments) = self.adjacency.get(u) else {
                continue;
            };
            for &i in segments {
                if std::mem::replace(&mut self.used[i], true) {
                    continue;
                }
                let res = &payload.ress[i];
                let v = if res.a == u { res.b.as_str() } else { res.a.as_str() };
                if !self.visited.insert(v) {
                    self.dropped += 1;
                    continue;
                }
                tree.insert_segment(u, v, res.value);
                queue.push_back(v);
            }
        }
    }
}
