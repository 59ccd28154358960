//! The RC-tree evaluation engine.
//!
//! An [`RcTree`] owns every node and edge of one net's extracted parasitic
//! network. Nodes live in an append-only arena addressed by [`RctNodeId`], so
//! edges can refer to their endpoints by ID and inserting new nodes never
//! invalidates existing references.
//!
//! [`RcTree::update_rc_timing`] computes, for every corner, the moments of the
//! impulse response at each node with four linear sweeps:
//!
//! 1. load (bottom-up): `load(n) = cap(n) + Σ load(child)`
//! 2. delay (top-down): `delay(c) = delay(p) + R(p→c) · load(c)`
//! 3. load-weighted delay (bottom-up): `ldelay(n) = cap(n)·delay(n) + Σ ldelay(child)`
//! 4. response (top-down): `beta(c) = beta(p) + R(p→c) · ldelay(c)`, and
//!    `impulse(n) = 2·beta(n) − delay(n)²`
//!
//! `delay` is the first moment (Elmore delay), `impulse` the second central
//! moment that [`RctNode::slew`] combines with the input slew.

use crate::edge::RctEdge;
use crate::error::{RctError, RctResult};
use crate::ids::{RctEdgeId, RctNodeId};
use crate::node::RctNode;
use elmore_common::{Corner, CornerGrid, Terminal};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The RC network of a single net.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RcTree {
    nodes: Vec<RctNode>,
    index: HashMap<String, RctNodeId>,
    edges: Vec<RctEdge>,
    root: Option<RctNodeId>,
}

/// A node reached during traversal, with the edge it was reached through.
#[derive(Clone, Copy)]
struct Visit {
    node: RctNodeId,
    edge: Option<RctEdgeId>,
}

impl RcTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or fetches it if the name already exists, and sets its
    /// wire capacitance at every corner to `cap`.
    ///
    /// The first node created in the tree becomes its root.
    pub fn insert_node(&mut self, name: &str, cap: f64) -> RctNodeId {
        let id = self.node_id_or_insert(name);
        self.nodes[id.index()].ncap = CornerGrid::splat(cap);
        id
    }

    /// Inserts a directed edge `from → to`, creating missing endpoints.
    ///
    /// If `to` was the root, `from` becomes the new root. Each node must
    /// receive at most one incoming edge; this is not checked here.
    pub fn insert_edge(&mut self, from: &str, to: &str, res: f64) -> RctEdgeId {
        let tail = self.node_id_or_insert(from);
        let head = self.node_id_or_insert(to);
        let id = RctEdgeId::from_raw(self.edges.len() as u32);
        self.edges.push(RctEdge::new(tail, head, res));
        self.nodes[tail.index()].fanout.push(id);
        self.nodes[head.index()].fanin = Some(id);
        if self.root == Some(head) {
            self.root = Some(tail);
        }
        id
    }

    /// Inserts a wire segment between two (possibly synthesized) nodes.
    ///
    /// Identical to [`insert_edge`](Self::insert_edge).
    pub fn insert_segment(&mut self, from: &str, to: &str, res: f64) -> RctEdgeId {
        self.insert_edge(from, to, res)
    }

    /// Makes the named node the root of the tree.
    pub fn set_root(&mut self, name: &str) -> RctResult<()> {
        let id = self.node_id(name)?;
        self.root = Some(id);
        Ok(())
    }

    pub(crate) fn set_root_id(&mut self, id: RctNodeId) {
        self.root = Some(id);
    }

    /// Returns the root node, if the tree has any nodes.
    pub fn root(&self) -> Option<&RctNode> {
        self.root.map(|id| &self.nodes[id.index()])
    }

    /// Returns the ID of the root node.
    pub fn root_id(&self) -> Option<RctNodeId> {
        self.root
    }

    /// Recomputes load, delay and slew support values for every node at
    /// every corner.
    ///
    /// Nodes unreachable from the root keep zero results. A tree without
    /// nodes evaluates trivially.
    pub fn update_rc_timing(&mut self) -> RctResult<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }
        let root = self.root.ok_or(RctError::MissingRoot)?;
        for node in &mut self.nodes {
            node.reset_results();
        }

        let order = self.preorder(root);
        for corner in Corner::all() {
            self.update_load(&order, corner);
            self.update_delay(&order, corner);
            self.update_ldelay(&order, corner);
            self.update_response(&order, corner);
        }
        tracing::trace!(
            nodes = self.nodes.len(),
            reached = order.len(),
            "rc tree evaluated"
        );
        Ok(())
    }

    /// Returns the sum of the wire capacitances of all nodes at the
    /// representative corner, independent of the tree shape.
    pub fn total_ncap(&self) -> f64 {
        self.nodes
            .iter()
            .map(|n| n.ncap(Corner::REPRESENTATIVE))
            .sum()
    }

    /// Returns the sum of all node capacitances, including bound terminal
    /// pin loads, at `corner`.
    pub fn total_cap(&self, corner: Corner) -> f64 {
        self.nodes.iter().map(|n| n.cap(corner)).sum()
    }

    /// Returns the output slew at the named node for `input_slew` at the root.
    pub fn slew(&self, name: &str, corner: Corner, input_slew: f64) -> RctResult<f64> {
        self.lookup(name).map(|n| n.slew(corner, input_slew))
    }

    /// Returns the Elmore delay from the root to the named node.
    pub fn delay(&self, name: &str, corner: Corner) -> RctResult<f64> {
        self.lookup(name).map(|n| n.delay(corner))
    }

    /// Returns the downstream load of the named node.
    pub fn load(&self, name: &str, corner: Corner) -> RctResult<f64> {
        self.lookup(name).map(|n| n.load(corner))
    }

    /// Returns the named node, if it exists.
    pub fn node(&self, name: &str) -> Option<&RctNode> {
        self.index.get(name).map(|id| &self.nodes[id.index()])
    }

    /// Returns the node with the given ID.
    pub fn node_by_id(&self, id: RctNodeId) -> &RctNode {
        &self.nodes[id.index()]
    }

    /// Returns the edge with the given ID.
    pub fn edge(&self, id: RctEdgeId) -> &RctEdge {
        &self.edges[id.index()]
    }

    /// Returns the edge with the given ID for modification.
    pub fn edge_mut(&mut self, id: RctEdgeId) -> &mut RctEdge {
        &mut self.edges[id.index()]
    }

    /// Returns all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &RctNode> {
        self.nodes.iter()
    }

    /// Returns all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &RctEdge> {
        self.edges.iter()
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Multiplies every node's wire capacitance by `factor`.
    pub fn scale_capacitance(&mut self, factor: f64) {
        for node in &mut self.nodes {
            node.scale_capacitance(factor);
        }
    }

    /// Multiplies every edge's resistance by `factor`.
    pub fn scale_resistance(&mut self, factor: f64) {
        for edge in &mut self.edges {
            edge.scale_resistance(factor);
        }
    }

    /// Scans the tree for violations of the single-rooted-tree shape and for
    /// physically invalid values.
    ///
    /// Evaluation never performs these checks itself.
    pub fn check_structure(&self) -> Vec<StructureIssue> {
        let mut issues = Vec::new();
        let Some(root) = self.root else {
            if !self.nodes.is_empty() {
                issues.push(StructureIssue::MissingRoot);
            }
            return issues;
        };

        let mut fanin_count = vec![0usize; self.nodes.len()];
        for edge in &self.edges {
            fanin_count[edge.to.index()] += 1;
            if edge.res < 0.0 {
                issues.push(StructureIssue::NegativeResistance {
                    from: self.nodes[edge.from.index()].name.clone(),
                    to: self.nodes[edge.to.index()].name.clone(),
                    res: edge.res,
                });
            }
        }
        for (node, &count) in self.nodes.iter().zip(&fanin_count) {
            if count > 1 {
                issues.push(StructureIssue::MultipleFanin {
                    node: node.name.clone(),
                    count,
                });
            }
            let cap = node.ncap(Corner::REPRESENTATIVE);
            if cap < 0.0 {
                issues.push(StructureIssue::NegativeCapacitance {
                    node: node.name.clone(),
                    cap,
                });
            }
        }
        if fanin_count[root.index()] > 0 {
            issues.push(StructureIssue::RootHasFanin {
                node: self.nodes[root.index()].name.clone(),
            });
        }

        let mut reached = vec![false; self.nodes.len()];
        for visit in self.preorder(root) {
            reached[visit.node.index()] = true;
        }
        for (node, _) in self.nodes.iter().zip(&reached).filter(|(_, r)| !**r) {
            issues.push(StructureIssue::Unreachable {
                node: node.name.clone(),
            });
        }
        issues
    }

    /// Binds `terminal` to the node of the same name. Returns `false` if the
    /// tree has no such node.
    pub(crate) fn bind_terminal(&mut self, terminal: &Terminal) -> bool {
        match self.index.get(&terminal.name) {
            Some(id) => {
                self.nodes[id.index()].terminal = Some(terminal.clone());
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear_terminals(&mut self) {
        for node in &mut self.nodes {
            node.terminal = None;
        }
    }

    fn node_id(&self, name: &str) -> RctResult<RctNodeId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| RctError::node_not_found(name))
    }

    fn lookup(&self, name: &str) -> RctResult<&RctNode> {
        self.node_id(name).map(|id| &self.nodes[id.index()])
    }

    fn node_id_or_insert(&mut self, name: &str) -> RctNodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = RctNodeId::from_raw(self.nodes.len() as u32);
        self.nodes.push(RctNode::new(name));
        self.index.insert(name.to_string(), id);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Depth-first pre-order from `root`. Every node appears at most once and
    /// after the node it was reached from.
    fn preorder(&self, root: RctNodeId) -> Vec<Visit> {
        let mut visited = vec![false; self.nodes.len()];
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![Visit {
            node: root,
            edge: None,
        }];
        while let Some(visit) = stack.pop() {
            if std::mem::replace(&mut visited[visit.node.index()], true) {
                continue;
            }
            order.push(visit);
            for &e in self.nodes[visit.node.index()].fanout.iter().rev() {
                let to = self.edges[e.index()].to;
                if !visited[to.index()] {
                    stack.push(Visit {
                        node: to,
                        edge: Some(e),
                    });
                }
            }
        }
        order
    }

    fn update_load(&mut self, order: &[Visit], corner: Corner) {
        for visit in order.iter().rev() {
            let node = &mut self.nodes[visit.node.index()];
            let cap = node.cap(corner);
            node.load[corner] += cap;
            let load = node.load[corner];
            if let Some(e) = visit.edge {
                let parent = self.edges[e.index()].from;
                self.nodes[parent.index()].load[corner] += load;
            }
        }
    }

    fn update_delay(&mut self, order: &[Visit], corner: Corner) {
        for visit in order {
            let Some(e) = visit.edge else { continue };
            let edge = &self.edges[e.index()];
            let upstream = self.nodes[edge.from.index()].delay[corner];
            let node = &mut self.nodes[visit.node.index()];
            node.delay[corner] = upstream + edge.res * node.load[corner];
        }
    }

    fn update_ldelay(&mut self, order: &[Visit], corner: Corner) {
        for visit in order.iter().rev() {
            let node = &mut self.nodes[visit.node.index()];
            let own = node.cap(corner) * node.delay[corner];
            node.ldelay[corner] += own;
            let ldelay = node.ldelay[corner];
            if let Some(e) = visit.edge {
                let parent = self.edges[e.index()].from;
                self.nodes[parent.index()].ldelay[corner] += ldelay;
            }
        }
    }

    fn update_response(&mut self, order: &[Visit], corner: Corner) {
        for visit in order {
            if let Some(e) = visit.edge {
                let edge = &self.edges[e.index()];
                let upstream = self.nodes[edge.from.index()].beta[corner];
                let node = &mut self.nodes[visit.node.index()];
                node.beta[corner] = upstream + edge.res * node.ldelay[corner];
            }
            let node = &mut self.nodes[visit.node.index()];
            node.impulse[corner] = 2.0 * node.beta[corner] - node.delay[corner].powi(2);
        }
    }
}

/// A structural or physical problem found by [`RcTree::check_structure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StructureIssue {
    /// The tree has nodes but no root.
    MissingRoot,
    /// The root node has an incoming edge.
    RootHasFanin {
        /// The root node name.
        node: String,
    },
    /// A node has more than one incoming edge.
    MultipleFanin {
        /// The node name.
        node: String,
        /// The number of incoming edges.
        count: usize,
    },
    /// A node cannot be reached from the root.
    Unreachable {
        /// The node name.
        node: String,
    },
    /// An edge has a negative resistance.
    NegativeResistance {
        /// The upstream node name.
        from: String,
        /// The downstream node name.
        to: String,
        /// The resistance value.
        res: f64,
    },
    /// A node has a negative wire capacitance.
    NegativeCapacitance {
        /// The node name.
        node: String,
        /// The capacitance value.
        cap: f64,
    },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::MissingRoot => write!(f, "tree has no root node"),
            StructureIssue::RootHasFanin { node } => {
                write!(f, "root '{node}' has an incoming edge")
            }
            StructureIssue::MultipleFanin { node, count } => {
                write!(f, "node '{node}' has {count} incoming edges")
            }
            StructureIssue::Unreachable { node } => {
                write!(f, "node '{node}' is unreachable from the root")
            }
            StructureIssue::NegativeResistance { from, to, res } => {
                write!(f, "edge '{from}' -> '{to}' has negative resistance {res}")
            }
            StructureIssue::NegativeCapacitance { node, cap } => {
                write!(f, "node '{node}' has negative capacitance {cap}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmore_common::{Split, Tran};

    const EPS: f64 = 1e-9;

    fn chain() -> RcTree {
        let mut t = RcTree::new();
        t.insert_node("root", 0.0);
        t.insert_node("a", 1.0);
        t.insert_node("b", 1.0);
        t.insert_edge("root", "a", 100.0);
        t.insert_edge("a", "b", 100.0);
        t
    }

    #[test]
    fn empty_tree() {
        let mut t = RcTree::new();
        assert_eq!(t.num_nodes(), 0);
        assert_eq!(t.num_edges(), 0);
        assert!(t.root().is_none());
        assert_eq!(t.update_rc_timing(), Ok(()));
        assert_eq!(t.total_ncap(), 0.0);
        assert!(t.check_structure().is_empty());
    }

    #[test]
    fn first_node_is_root() {
        let mut t = RcTree::new();
        t.insert_node("drv", 0.0);
        t.insert_node("sink", 1.0);
        assert_eq!(t.root().unwrap().name(), "drv");
    }

    #[test]
    fn insert_node_is_create_or_fetch() {
        let mut t = RcTree::new();
        let a = t.insert_node("a", 1.0);
        let again = t.insert_node("a", 2.0);
        assert_eq!(a, again);
        assert_eq!(t.num_nodes(), 1);
        assert_eq!(t.node("a").unwrap().ncap(Corner::REPRESENTATIVE), 2.0);
    }

    #[test]
    fn insert_edge_creates_endpoints() {
        let mut t = RcTree::new();
        let e = t.insert_edge("x", "y", 5.0);
        assert_eq!(t.num_nodes(), 2);
        assert_eq!(t.num_edges(), 1);
        let edge = t.edge(e);
        assert_eq!(t.node_by_id(edge.from()).name(), "x");
        assert_eq!(t.node_by_id(edge.to()).name(), "y");
        assert_eq!(t.node("y").unwrap().fanin(), Some(e));
        assert_eq!(t.node("x").unwrap().fanout(), &[e]);
    }

    #[test]
    fn edge_into_root_moves_root_upstream() {
        let mut t = RcTree::new();
        t.insert_node("b", 1.0);
        t.insert_edge("a", "b", 10.0);
        assert_eq!(t.root().unwrap().name(), "a");
    }

    #[test]
    fn node_ids_stay_valid_under_growth() {
        let mut t = RcTree::new();
        let first = t.insert_node("n0", 1.0);
        for i in 1..1000 {
            t.insert_edge(&format!("n{}", i - 1), &format!("n{i}"), 1.0);
        }
        assert_eq!(t.node_by_id(first).name(), "n0");
        assert_eq!(t.num_nodes(), 1000);
    }

    #[test]
    fn chain_load_and_delay() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        for c in Corner::all() {
            assert_eq!(t.load("b", c).unwrap(), 1.0);
            assert_eq!(t.load("a", c).unwrap(), 2.0);
            assert_eq!(t.load("root", c).unwrap(), 2.0);
            assert_eq!(t.delay("root", c).unwrap(), 0.0);
            assert_eq!(t.delay("a", c).unwrap(), 200.0);
            assert_eq!(t.delay("b", c).unwrap(), 300.0);
        }
    }

    #[test]
    fn chain_second_moment() {
        // ldelay(b) = 300, ldelay(a) = 500
        // beta(a) = 100 * 500 = 50000, beta(b) = 50000 + 100 * 300 = 80000
        let mut t = chain();
        t.update_rc_timing().unwrap();
        let c = Corner::REPRESENTATIVE;
        let a = t.node("a").unwrap();
        let b = t.node("b").unwrap();
        assert!((a.impulse(c) - 60000.0).abs() < EPS);
        assert!((b.impulse(c) - 70000.0).abs() < EPS);
        assert!((t.slew("a", c, 0.0).unwrap() - 60000.0_f64.sqrt()).abs() < EPS);
        assert!((t.slew("b", c, 30.0).unwrap() - 70900.0_f64.sqrt()).abs() < EPS);
    }

    #[test]
    fn root_load_equals_total_cap() {
        let mut t = RcTree::new();
        t.insert_node("r", 0.5);
        t.insert_node("m", 1.25);
        t.insert_node("s1", 2.0);
        t.insert_node("s2", 3.0);
        t.insert_edge("r", "m", 10.0);
        t.insert_edge("m", "s1", 20.0);
        t.insert_edge("m", "s2", 30.0);
        t.update_rc_timing().unwrap();
        for c in Corner::all() {
            let root_load = t.root().unwrap().load(c);
            assert!((root_load - t.total_ncap()).abs() < EPS);
            assert!((root_load - t.total_cap(c)).abs() < EPS);
            assert!((root_load - 6.75).abs() < EPS);
        }
    }

    #[test]
    fn branch_delay() {
        let mut t = RcTree::new();
        t.insert_node("r", 0.0);
        t.insert_node("m", 1.0);
        t.insert_node("s1", 2.0);
        t.insert_node("s2", 3.0);
        t.insert_edge("r", "m", 10.0);
        t.insert_edge("m", "s1", 20.0);
        t.insert_edge("m", "s2", 30.0);
        t.update_rc_timing().unwrap();
        let c = Corner::new(Split::Max, Tran::Fall);
        assert_eq!(t.delay("m", c).unwrap(), 60.0);
        assert_eq!(t.delay("s1", c).unwrap(), 100.0);
        assert_eq!(t.delay("s2", c).unwrap(), 150.0);
    }

    #[test]
    fn single_node_tree() {
        let mut t = RcTree::new();
        t.insert_node("only", 4.0);
        t.update_rc_timing().unwrap();
        for c in Corner::all() {
            assert_eq!(t.load("only", c).unwrap(), 4.0);
            assert_eq!(t.delay("only", c).unwrap(), 0.0);
            assert_eq!(t.slew("only", c, 12.5).unwrap(), 12.5);
        }
    }

    #[test]
    fn slew_monotone_in_input_slew() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        for c in Corner::all() {
            let mut prev = f64::NEG_INFINITY;
            for i in -50..=50 {
                let s = t.slew("b", c, i as f64 * 10.0).unwrap();
                assert!(s >= prev);
                prev = s;
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        let snapshot = |t: &RcTree| -> Vec<(f64, f64, f64)> {
            t.nodes()
                .flat_map(|n| Corner::all().map(move |c| (n.load(c), n.delay(c), n.impulse(c))))
                .collect()
        };
        let first = snapshot(&t);
        t.update_rc_timing().unwrap();
        assert_eq!(first, snapshot(&t));
    }

    #[test]
    fn resistance_scaling_roundtrip() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        let before = t.delay("b", Corner::REPRESENTATIVE).unwrap();
        t.scale_resistance(3.0);
        t.update_rc_timing().unwrap();
        assert!((t.delay("b", Corner::REPRESENTATIVE).unwrap() - 3.0 * before).abs() < EPS);
        t.scale_resistance(1.0 / 3.0);
        t.update_rc_timing().unwrap();
        assert!((t.delay("b", Corner::REPRESENTATIVE).unwrap() - before).abs() < 1e-6);
    }

    #[test]
    fn capacitance_scaling() {
        let mut t = chain();
        t.scale_capacitance(2.0);
        t.update_rc_timing().unwrap();
        assert_eq!(t.load("a", Corner::REPRESENTATIVE).unwrap(), 4.0);
        assert_eq!(t.total_ncap(), 4.0);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        let c = Corner::REPRESENTATIVE;
        assert_eq!(t.delay("nope", c), Err(RctError::node_not_found("nope")));
        assert_eq!(t.slew("nope", c, 1.0), Err(RctError::node_not_found("nope")));
        assert!(t.node("nope").is_none());
        assert!(t.set_root("nope").is_err());
    }

    #[test]
    fn bound_terminal_adds_pin_load() {
        let mut t = chain();
        assert!(t.bind_terminal(&Terminal::with_cap("b", 1.0)));
        assert!(!t.bind_terminal(&Terminal::with_cap("zz", 1.0)));
        t.update_rc_timing().unwrap();
        let c = Corner::REPRESENTATIVE;
        assert_eq!(t.load("b", c).unwrap(), 2.0);
        assert_eq!(t.delay("b", c).unwrap(), 300.0 + 100.0 + 100.0);
        t.clear_terminals();
        t.update_rc_timing().unwrap();
        assert_eq!(t.load("b", c).unwrap(), 1.0);
    }

    #[test]
    fn unreachable_node_keeps_zero_state() {
        let mut t = chain();
        t.insert_node("island", 5.0);
        t.update_rc_timing().unwrap();
        let island = t.node("island").unwrap();
        assert_eq!(island.load(Corner::REPRESENTATIVE), 0.0);
        assert_eq!(island.delay(Corner::REPRESENTATIVE), 0.0);
        assert_eq!(
            t.check_structure(),
            vec![StructureIssue::Unreachable {
                node: "island".to_string()
            }]
        );
    }

    #[test]
    fn check_structure_reports_multiple_fanin() {
        let mut t = chain();
        t.insert_edge("root", "b", 50.0);
        let issues = t.check_structure();
        assert!(issues.contains(&StructureIssue::MultipleFanin {
            node: "b".to_string(),
            count: 2
        }));
        // Evaluation still terminates.
        t.update_rc_timing().unwrap();
    }

    #[test]
    fn check_structure_reports_negative_values() {
        let mut t = chain();
        t.scale_resistance(-1.0);
        t.insert_node("b", -1.0);
        let issues = t.check_structure();
        assert_eq!(
            issues
                .iter()
                .filter(|i| matches!(i, StructureIssue::NegativeResistance { .. }))
                .count(),
            2
        );
        assert!(issues.contains(&StructureIssue::NegativeCapacitance {
            node: "b".to_string(),
            cap: -1.0
        }));
    }

    #[test]
    fn cycle_does_not_hang() {
        let mut t = RcTree::new();
        t.insert_node("a", 1.0);
        t.insert_edge("a", "b", 1.0);
        t.insert_edge("b", "c", 1.0);
        t.insert_edge("c", "b", 1.0);
        t.update_rc_timing().unwrap();
        assert!(!t.check_structure().is_empty());
    }

    #[test]
    fn long_chain_does_not_overflow_stack() {
        let mut t = RcTree::new();
        t.insert_node("n0", 0.0);
        for i in 1..200_000 {
            t.insert_edge(&format!("n{}", i - 1), &format!("n{i}"), 1e-3);
            t.insert_node(&format!("n{i}"), 1e-3);
        }
        t.update_rc_timing().unwrap();
        assert!(t.delay("n199999", Corner::REPRESENTATIVE).unwrap() > 0.0);
    }

    #[test]
    fn structure_issue_display() {
        let issue = StructureIssue::MultipleFanin {
            node: "n3".to_string(),
            count: 2,
        };
        assert_eq!(issue.to_string(), "node 'n3' has 2 incoming edges");
    }

    #[test]
    fn tree_serde_roundtrip() {
        let mut t = chain();
        t.update_rc_timing().unwrap();
        let json = serde_json::to_string(&t).unwrap();
        let restored: RcTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.num_nodes(), 3);
        assert_eq!(restored.num_edges(), 2);
        assert_eq!(restored.delay("b", Corner::REPRESENTATIVE).unwrap(), 300.0);
    }
}
