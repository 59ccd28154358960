//! Shared pipeline helpers for CLI commands.
//!
//! Configuration discovery, payload file loading and net construction used by
//! both `report` and `check`.

use std::path::{Path, PathBuf};

use elmore_common::Terminal;
use elmore_config::{AnalysisConfig, DerateConfig, CONFIG_FILE};
use elmore_rct::{build_rct, Net, ParasiticNet};
use serde::Deserialize;

use crate::GlobalArgs;

/// Contents of a payload file: one net or a list of nets.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PayloadFile {
    Many(Vec<ParasiticNet>),
    One(ParasiticNet),
}

/// Reads the parasitic payloads stored in a JSON file.
pub fn load_payloads(path: &Path) -> Result<Vec<ParasiticNet>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    parse_payloads(&content)
}

/// Parses payload JSON holding either a single net object or an array.
pub fn parse_payloads(content: &str) -> Result<Vec<ParasiticNet>, Box<dyn std::error::Error>> {
    let file: PayloadFile = serde_json::from_str(content)
        .map_err(|e| format!("invalid parasitic payload: {e}"))?;
    Ok(match file {
        PayloadFile::Many(nets) => nets,
        PayloadFile::One(net) => vec![net],
    })
}

/// Walks up from `start` looking for the nearest directory containing
/// `elmore.toml`.
pub fn find_config_dir(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolves the analysis configuration from global CLI args.
///
/// If `--config` is specified, loads that file (or `elmore.toml` inside that
/// directory). Otherwise walks up from the current directory; when no
/// `elmore.toml` is found the defaults apply.
pub fn resolve_config(global: &GlobalArgs) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_dir() {
            return Ok(elmore_config::load_config(&p)?);
        }
        let content = std::fs::read_to_string(&p)
            .map_err(|e| format!("failed to read {}: {e}", p.display()))?;
        return Ok(elmore_config::load_config_from_str(&content)?);
    }
    match find_config_dir(&std::env::current_dir()?) {
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "using configuration");
            Ok(elmore_config::load_config(&dir)?)
        }
        None => Ok(AnalysisConfig::default()),
    }
}

/// Returns the leaf node names of the tree built from `payload`, in
/// insertion order, excluding the root.
pub fn leaf_nodes(payload: &ParasiticNet, driver: Option<&str>) -> Vec<String> {
    let tree = build_rct(payload, driver);
    let root = tree.root().map(|n| n.name().to_string());
    tree.nodes()
        .filter(|n| n.fanout().is_empty() && Some(n.name()) != root.as_deref())
        .map(|n| n.name().to_string())
        .collect()
}

/// Builds a net for `payload` with `driver` as its root terminal and `sinks`
/// as receivers, then attaches the payload and applies `derate`.
///
/// A `None` driver selects the payload's first node, and a payload without
/// nodes leaves the driver unset. An empty sink list selects every leaf.
pub fn build_net(
    payload: ParasiticNet,
    driver: Option<&str>,
    sinks: &[String],
    derate: DerateConfig,
) -> Net {
    let driver = driver.or_else(|| payload.first_node()).map(str::to_string);
    let sinks = if sinks.is_empty() {
        leaf_nodes(&payload, driver.as_deref())
    } else {
        sinks.to_vec()
    };

    let mut net = Net::new(payload.name.clone());
    if let Some(driver) = driver {
        net.set_root(Terminal::new(driver));
    }
    for sink in sinks {
        net.append(Terminal::new(sink));
    }
    net.attach(payload);
    if !derate.is_identity() {
        net.scale_capacitance(derate.capacitance);
        net.scale_resistance(derate.resistance);
    }
    net
}
