//! Per-net façade over the RC-tree engine.
//!
//! A [`Net`] starts out with a placeholder model that has no parasitics: every
//! terminal sees zero delay and its input slew unchanged, and the load is the
//! sum of the attached pin capacitances. Attaching a [`ParasiticNet`] switches
//! the net, once and for good, to a full [`RcTree`] built from that payload.
//!
//! Results are computed lazily. Every mutation that can change them clears a
//! single "results current" flag, and every query first passes a recompute
//! gate that evaluates the active model only when that flag is clear.

use crate::error::{RctError, RctResult};
use crate::parasitics::{build_rct, ParasiticNet};
use crate::tree::RcTree;
use elmore_common::{Corner, CornerGrid, Terminal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// The stand-in model used before parasitics are known.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmptyRct {
    /// Total pin load per corner.
    pub load: CornerGrid<f64>,
}

/// The electrical model of a net: a placeholder or a full RC tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RcModel {
    /// No parasitics attached yet.
    Placeholder(EmptyRct),
    /// A fully extracted RC tree.
    Tree(RcTree),
}

/// One electrical net: its terminals, its RC model and cached timing results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    name: String,
    root: Option<Terminal>,
    terminals: Vec<Terminal>,
    model: RcModel,
    parasitics: Option<ParasiticNet>,
    cap_scale: f64,
    res_scale: f64,
    rc_timing_updated: bool,
}

impl Net {
    /// Creates an empty net in the placeholder state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root: None,
            terminals: Vec::new(),
            model: RcModel::Placeholder(EmptyRct::default()),
            parasitics: None,
            cap_scale: 1.0,
            res_scale: 1.0,
            rc_timing_updated: false,
        }
    }

    /// Returns the net name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the driver terminal, if one has been set.
    pub fn root(&self) -> Option<&Terminal> {
        self.root.as_ref()
    }

    /// Sets the driver terminal.
    ///
    /// On a net with parasitics, the RC tree is rebuilt from the retained
    /// payload so that it is oriented away from the new driver. Edits made
    /// through [`rct_mut`](Self::rct_mut) are lost in that case.
    pub fn set_root(&mut self, terminal: Terminal) -> &mut Self {
        let changed = self.root.as_ref().map(|t| t.name.as_str()) != Some(terminal.name.as_str());
        self.root = Some(terminal);
        if changed && self.parasitics.is_some() {
            self.make_rct();
        }
        self.mark_stale();
        self
    }

    /// Appends a terminal in attachment order.
    pub fn append(&mut self, terminal: Terminal) -> &mut Self {
        self.terminals.push(terminal);
        self.mark_stale();
        self
    }

    /// Detaches the first terminal with the given name and returns it.
    pub fn remove(&mut self, name: &str) -> RctResult<Terminal> {
        let pos = self
            .terminals
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| RctError::terminal_not_found(name))?;
        self.mark_stale();
        Ok(self.terminals.remove(pos))
    }

    /// Returns the attached terminals in attachment order.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// Returns the number of attached terminals.
    pub fn num_terminals(&self) -> usize {
        self.terminals.len()
    }

    /// Returns the active model.
    pub fn model(&self) -> &RcModel {
        &self.model
    }

    /// Returns the RC tree, if parasitics have been attached.
    pub fn rct(&self) -> Option<&RcTree> {
        match &self.model {
            RcModel::Tree(tree) => Some(tree),
            RcModel::Placeholder(_) => None,
        }
    }

    /// Returns the RC tree for modification. Marks the results stale.
    pub fn rct_mut(&mut self) -> Option<&mut RcTree> {
        self.mark_stale();
        match &mut self.model {
            RcModel::Tree(tree) => Some(tree),
            RcModel::Placeholder(_) => None,
        }
    }

    /// Returns the retained parasitic payload, if any.
    pub fn parasitics(&self) -> Option<&ParasiticNet> {
        self.parasitics.as_ref()
    }

    /// Returns whether cached results reflect the current model.
    pub fn is_rc_timing_updated(&self) -> bool {
        self.rc_timing_updated
    }

    /// Attaches extracted parasitics and builds the RC tree from them.
    ///
    /// The net stays in the tree state from now on; attaching again replaces
    /// the payload and rebuilds the tree.
    pub fn attach(&mut self, payload: ParasiticNet) {
        if self.parasitics.is_some() {
            debug!(net = %self.name, "replacing attached parasitics");
        }
        self.parasitics = Some(payload);
        self.make_rct();
    }

    /// Multiplies every capacitance of the active model by `factor`.
    pub fn scale_capacitance(&mut self, factor: f64) {
        self.cap_scale *= factor;
        if let RcModel::Tree(tree) = &mut self.model {
            tree.scale_capacitance(factor);
        }
        self.mark_stale();
    }

    /// Multiplies every resistance of the active model by `factor`.
    pub fn scale_resistance(&mut self, factor: f64) {
        self.res_scale *= factor;
        if let RcModel::Tree(tree) = &mut self.model {
            tree.scale_resistance(factor);
        }
        self.mark_stale();
    }

    /// Returns the total load seen by the driver.
    pub fn load(&mut self, corner: Corner) -> RctResult<f64> {
        self.ensure_rc_timing()?;
        match &self.model {
            RcModel::Placeholder(empty) => Ok(empty.load[corner]),
            RcModel::Tree(tree) => Ok(tree.root().map_or(0.0, |r| r.load(corner))),
        }
    }

    /// Returns the output slew at the named terminal for `input_slew` at the
    /// driver.
    pub fn slew(&mut self, terminal: &str, corner: Corner, input_slew: f64) -> RctResult<f64> {
        self.ensure_rc_timing()?;
        match &self.model {
            RcModel::Placeholder(_) => self.find_terminal(terminal).map(|_| input_slew),
            RcModel::Tree(tree) => tree
                .node(terminal)
                .map(|n| n.slew(corner, input_slew))
                .ok_or_else(|| RctError::terminal_not_found(terminal)),
        }
    }

    /// Returns the interconnect delay from the driver to the named terminal.
    pub fn delay(&mut self, terminal: &str, corner: Corner) -> RctResult<f64> {
        self.ensure_rc_timing()?;
        match &self.model {
            RcModel::Placeholder(_) => self.find_terminal(terminal).map(|_| 0.0),
            RcModel::Tree(tree) => tree
                .node(terminal)
                .map(|n| n.delay(corner))
                .ok_or_else(|| RctError::terminal_not_found(terminal)),
        }
    }

    /// Evaluates the active model unconditionally.
    ///
    /// Binds every attached terminal to its tree node, checks that the driver
    /// names a node of the tree, then runs the two-sweep evaluation.
    #[instrument(level = "debug", skip_all, fields(net = %self.name), err)]
    pub fn update_rc_timing(&mut self) -> RctResult<()> {
        let attached: Vec<&Terminal> = attached_terminals(self.root.as_ref(), &self.terminals);
        match &mut self.model {
            RcModel::Placeholder(empty) => {
                empty.load = CornerGrid::from_fn(|c| {
                    attached.iter().map(|t| t.cap(c)).sum::<f64>() * self.cap_scale
                });
            }
            RcModel::Tree(tree) => {
                tree.clear_terminals();
                for terminal in &attached {
                    if !tree.bind_terminal(terminal) {
                        debug!(terminal = %terminal.name, "terminal has no rc node");
                    }
                }
                if let Some(driver) = self.root.as_ref().filter(|_| tree.num_nodes() > 0) {
                    tree.set_root(&driver.name)
                        .map_err(|_| RctError::RootNotInTree {
                            net: self.name.clone(),
                            driver: driver.name.clone(),
                        })?;
                }
                tree.update_rc_timing()?;
            }
        }
        self.rc_timing_updated = true;
        debug!("rc timing updated");
        Ok(())
    }

    /// Clears the "results current" flag. Every result-changing mutation
    /// routes through here.
    fn mark_stale(&mut self) {
        self.rc_timing_updated = false;
    }

    fn ensure_rc_timing(&mut self) -> RctResult<()> {
        if !self.rc_timing_updated {
            self.update_rc_timing()?;
        }
        Ok(())
    }

    fn find_terminal(&self, name: &str) -> RctResult<&Terminal> {
        self.root
            .iter()
            .chain(&self.terminals)
            .find(|t| t.name == name)
            .ok_or_else(|| RctError::terminal_not_found(name))
    }

    fn make_rct(&mut self) {
        let Some(payload) = &self.parasitics else {
            return;
        };
        let mut tree = build_rct(payload, self.root.as_ref().map(|t| t.name.as_str()));
        if self.cap_scale != 1.0 {
            tree.scale_capacitance(self.cap_scale);
        }
        if self.res_scale != 1.0 {
            tree.scale_resistance(self.res_scale);
        }
        debug!(
            net = %self.name,
            nodes = tree.num_nodes(),
            edges = tree.num_edges(),
            "built rc tree"
        );
        self.model = RcModel::Tree(tree);
        self.mark_stale();
    }
}

/// The driver followed by every other terminal, without repeating the driver.
fn attached_terminals<'a>(
    root: Option<&'a Terminal>,
    terminals: &'a [Terminal],
) -> Vec<&'a Terminal> {
    let mut attached: Vec<&Terminal> = root.into_iter().collect();
    attached.extend(
        terminals
            .iter()
            .filter(|t| root.map_or(true, |r| r.name != t.name)),
    );
    attached
}

/// Evaluates many independent nets in parallel.
///
/// Nets share no state, so each one is updated on its own worker. Every stale
/// net is evaluated even when another one fails; failed nets stay stale. The
/// first error in slice order is returned.
pub fn update_nets(nets: &mut [Net]) -> RctResult<()> {
    let results: Vec<RctResult<()>> = nets
        .par_iter_mut()
        .filter(|net| !net.is_rc_timing_updated())
        .map(|net| net.update_rc_timing())
        .collect();
    results.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupKind;
    use crate::parasitics::{CapElement, ResElement};
    use elmore_common::{Split, Tran};

    const EPS: f64 = 1e-9;

    fn chain_payload() -> ParasiticNet {
        ParasiticNet {
            name: "n1".to_string(),
            total_cap: 2.0,
            caps: vec![
                CapElement::ground("drv", 0.0),
                CapElement::ground("a", 1.0),
                CapElement::ground("b", 1.0),
            ],
            ress: vec![
                ResElement::new("drv", "a", 100.0),
                ResElement::new("a", "b", 100.0),
            ],
        }
    }

    fn attached_net() -> Net {
        let mut net = Net::new("n1");
        net.set_root(Terminal::new("drv"));
        net.append(Terminal::new("a")).append(Terminal::new("b"));
        net.attach(chain_payload());
        net
    }

    #[test]
    fn new_net_is_placeholder() {
        let net = Net::new("n0");
        assert_eq!(net.name(), "n0");
        assert!(net.rct().is_none());
        assert!(net.root().is_none());
        assert_eq!(net.num_terminals(), 0);
        assert!(!net.is_rc_timing_updated());
    }

    #[test]
    fn placeholder_delay_zero_slew_passthrough() {
        let mut net = Net::new("n0");
        net.set_root(Terminal::new("drv"));
        net.append(Terminal::with_cap("s1", 2.0));
        net.scale_resistance(5.0);
        for c in Corner::all() {
            assert_eq!(net.delay("s1", c).unwrap(), 0.0);
            assert_eq!(net.slew("s1", c, 7.5).unwrap(), 7.5);
            assert_eq!(net.delay("drv", c).unwrap(), 0.0);
        }
        assert!(net.rct_mut().is_none());
        assert_eq!(net.slew("s1", Corner::REPRESENTATIVE, 3.0).unwrap(), 3.0);
    }

    #[test]
    fn placeholder_load_sums_pin_caps() {
        let mut net = Net::new("n0");
        net.append(Terminal::with_cap("s1", 2.0));
        net.append(Terminal::with_cap("s2", 0.5));
        assert_eq!(net.load(Corner::REPRESENTATIVE).unwrap(), 2.5);
        net.scale_capacitance(2.0);
        assert_eq!(net.load(Corner::REPRESENTATIVE).unwrap(), 5.0);
    }

    #[test]
    fn placeholder_unknown_terminal() {
        let mut net = Net::new("n0");
        net.append(Terminal::new("s1"));
        let err = net.delay("zz", Corner::REPRESENTATIVE).unwrap_err();
        assert_eq!(
            err,
            RctError::NotFound {
                kind: LookupKind::Terminal,
                name: "zz".to_string()
            }
        );
        assert!(net.slew("zz", Corner::REPRESENTATIVE, 1.0).is_err());
    }

    #[test]
    fn attach_switches_to_tree() {
        let mut net = attached_net();
        assert!(net.rct().is_some());
        assert_eq!(net.parasitics().unwrap().name, "n1");
        for c in Corner::all() {
            assert_eq!(net.load(c).unwrap(), 2.0);
            assert_eq!(net.delay("drv", c).unwrap(), 0.0);
            assert_eq!(net.delay("a", c).unwrap(), 200.0);
            assert_eq!(net.delay("b", c).unwrap(), 300.0);
        }
    }

    #[test]
    fn queries_recompute_lazily() {
        let mut net = attached_net();
        assert!(!net.is_rc_timing_updated());
        net.delay("b", Corner::REPRESENTATIVE).unwrap();
        assert!(net.is_rc_timing_updated());
        net.slew("b", Corner::REPRESENTATIVE, 1.0).unwrap();
        assert!(net.is_rc_timing_updated());
        net.scale_capacitance(2.0);
        assert!(!net.is_rc_timing_updated());
        assert_eq!(net.delay("b", Corner::REPRESENTATIVE).unwrap(), 600.0);
        assert!(net.is_rc_timing_updated());
    }

    #[test]
    fn pin_caps_load_the_tree() {
        let mut net = Net::new("n1");
        net.set_root(Terminal::new("drv"));
        net.append(Terminal::with_cap("b", 1.0));
        net.attach(chain_payload());
        let c = Corner::new(Split::Max, Tran::Rise);
        assert_eq!(net.load(c).unwrap(), 3.0);
        assert_eq!(net.delay("b", c).unwrap(), 500.0);
        net.remove("b").unwrap();
        assert_eq!(net.load(c).unwrap(), 2.0);
        assert!(net.remove("b").is_err());
    }

    #[test]
    fn resistance_scaling_roundtrip() {
        let mut net = attached_net();
        let before = net.delay("b", Corner::REPRESENTATIVE).unwrap();
        net.scale_resistance(4.0);
        assert!((net.delay("b", Corner::REPRESENTATIVE).unwrap() - 4.0 * before).abs() < EPS);
        net.scale_resistance(0.25);
        assert!((net.delay("b", Corner::REPRESENTATIVE).unwrap() - before).abs() < 1e-6);
        let res: Vec<f64> = net.rct().unwrap().edges().map(|e| e.res()).collect();
        assert_eq!(res, vec![100.0, 100.0]);
    }

    #[test]
    fn driver_missing_from_tree_is_an_error() {
        let mut net = Net::new("n1");
        net.attach(chain_payload());
        net.set_root(Terminal::new("ghost"));
        let err = net.delay("b", Corner::REPRESENTATIVE).unwrap_err();
        assert_eq!(
            err,
            RctError::RootNotInTree {
                net: "n1".to_string(),
                driver: "ghost".to_string()
            }
        );
    }

    #[test]
    fn changing_driver_reorients_tree() {
        let mut net = attached_net();
        net.scale_resistance(2.0);
        net.set_root(Terminal::new("b"));
        let tree = net.rct().unwrap();
        assert_eq!(tree.root().unwrap().name(), "b");
        assert!(tree.edges().all(|e| e.res() == 200.0));
        assert_eq!(net.delay("b", Corner::REPRESENTATIVE).unwrap(), 0.0);
        assert_eq!(net.delay("a", Corner::REPRESENTATIVE).unwrap(), 200.0);
        assert_eq!(net.delay("drv", Corner::REPRESENTATIVE).unwrap(), 200.0);
    }

    #[test]
    fn rct_mut_invalidates() {
        let mut net = attached_net();
        net.delay("b", Corner::REPRESENTATIVE).unwrap();
        net.rct_mut().unwrap().insert_edge("b", "c", 50.0);
        net.rct_mut().unwrap().insert_node("c", 1.0);
        assert!(!net.is_rc_timing_updated());
        assert_eq!(net.delay("c", Corner::REPRESENTATIVE).unwrap(), 550.0);
    }

    #[test]
    fn unknown_terminal_on_tree() {
        let mut net = attached_net();
        assert!(matches!(
            net.delay("zz", Corner::REPRESENTATIVE),
            Err(RctError::NotFound { .. })
        ));
        assert!(matches!(
            net.slew("zz", Corner::REPRESENTATIVE, 1.0),
            Err(RctError::NotFound { .. })
        ));
    }

    #[test]
    fn reattach_replaces_payload() {
        let mut net = attached_net();
        let mut payload = chain_payload();
        payload.ress[1].value = 300.0;
        net.attach(payload);
        assert_eq!(net.delay("b", Corner::REPRESENTATIVE).unwrap(), 500.0);
    }

    #[test]
    fn update_nets_in_parallel() {
        let mut nets: Vec<Net> = (0..8)
            .map(|i| {
                let mut net = attached_net();
                net.scale_resistance(i as f64 + 1.0);
                net
            })
            .collect();
        update_nets(&mut nets).unwrap();
        for (i, net) in nets.iter_mut().enumerate() {
            assert!(net.is_rc_timing_updated());
            let expected = 300.0 * (i as f64 + 1.0);
            assert!((net.delay("b", Corner::REPRESENTATIVE).unwrap() - expected).abs() < EPS);
        }
    }

    #[test]
    fn empty_payload_evaluates_to_zero_load() {
        let mut net = Net::new("empty");
        net.set_root(Terminal::new("drv"));
        net.attach(ParasiticNet::new("empty"));
        net.update_rc_timing().unwrap();
        for corner in Corner::all() {
            assert_eq!(net.load(corner).unwrap(), 0.0);
        }
        assert!(matches!(
            net.delay("drv", Corner::REPRESENTATIVE),
            Err(RctError::NotFound { .. })
        ));
    }

    #[test]
    fn update_nets_evaluates_past_a_failing_net() {
        let mut broken = Net::new("n1");
        broken.attach(chain_payload());
        broken.set_root(Terminal::new("ghost"));
        let mut empty = Net::new("empty");
        empty.attach(ParasiticNet::new("empty"));
        let mut nets = vec![broken, empty, attached_net()];

        let err = update_nets(&mut nets).unwrap_err();
        assert!(matches!(err, RctError::RootNotInTree { .. }));
        assert!(!nets[0].is_rc_timing_updated());
        assert!(nets[1].is_rc_timing_updated());
        assert!(nets[2].is_rc_timing_updated());
        assert_eq!(nets[2].delay("b", Corner::REPRESENTATIVE).unwrap(), 300.0);
    }

    #[test]
    fn net_serde_roundtrip() {
        let mut net = attached_net();
        net.update_rc_timing().unwrap();
        let json = serde_json::to_string(&net).unwrap();
        let mut restored: Net = serde_json::from_str(&json).unwrap();
        assert!(restored.is_rc_timing_updated());
        assert_eq!(restored.delay("b", Corner::REPRESENTATIVE).unwrap(), 300.0);
    }
}
