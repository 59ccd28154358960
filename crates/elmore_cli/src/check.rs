//! `elmore check` — structural validation of payload RC trees.

use std::path::Path;

use elmore_rct::{build_rct, ParasiticNet, StructureIssue};

use crate::pipeline::load_payloads;
use crate::{CheckArgs, GlobalArgs};

/// Runs the `elmore check` command.
///
/// Returns exit code 0 if every tree is well formed, 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let payloads = load_payloads(Path::new(&args.payload))?;

    let mut failed = 0usize;
    for payload in &payloads {
        let issues = check_payload(payload, args.driver.as_deref());
        if issues.is_empty() {
            if !global.quiet {
                println!("{}: ok", payload.name);
            }
            continue;
        }
        failed += 1;
        for issue in &issues {
            println!("{}: {issue}", payload.name);
        }
    }

    if !global.quiet {
        eprintln!(
            "   Checked {} net(s), {} with issues",
            payloads.len(),
            failed
        );
    }
    Ok(if failed == 0 { 0 } else { 1 })
}

/// Builds the tree for `payload` and returns its structural issues.
pub fn check_payload(payload: &ParasiticNet, driver: Option<&str>) -> Vec<StructureIssue> {
    build_rct(payload, driver).check_structure()
}
