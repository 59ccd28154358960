//! `elmore report` — per-sink interconnect timing.
//!
//! Loads the configuration and payload file, builds one net per payload,
//! evaluates them in parallel and prints a report per net.

use std::fmt::Write as _;
use std::path::Path;

use elmore_common::Corner;
use elmore_rct::{update_nets, Net, NetReport};

use crate::pipeline::{build_net, load_payloads, resolve_config};
use crate::{GlobalArgs, ReportArgs, ReportFormat};

/// Runs the `elmore report` command.
///
/// Nets that fail to evaluate are skipped with a warning and the rest are
/// still reported. Returns exit code 0 if every net was reported, 1 otherwise.
pub fn run(args: &ReportArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    let payloads = load_payloads(Path::new(&args.payload))?;
    let input_slew = args.input_slew.unwrap_or(config.analysis.input_slew);
    if !input_slew.is_finite() {
        return Err(format!("input slew must be finite, got {input_slew}").into());
    }

    let mut nets: Vec<_> = payloads
        .into_iter()
        .map(|p| build_net(p, args.driver.as_deref(), &args.sink, config.derate))
        .collect();
    if !global.quiet {
        eprintln!("   Evaluating {} net(s)", nets.len());
    }
    let (reports, failed) = report_nets(&mut nets, input_slew, &config.analysis.corners);

    match args.format {
        ReportFormat::Text => {
            for report in &reports {
                print!("{}", render_text(report));
            }
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    if failed > 0 && !global.quiet {
        eprintln!("   Skipped {failed} net(s) that failed to evaluate");
    }
    Ok(if failed == 0 { 0 } else { 1 })
}

/// Evaluates `nets` in parallel and reports each one that succeeds.
///
/// Returns the reports in input order and the number of skipped nets.
pub fn report_nets(
    nets: &mut [Net],
    input_slew: f64,
    corners: &[Corner],
) -> (Vec<NetReport>, usize) {
    if let Err(e) = update_nets(nets) {
        tracing::debug!(error = %e, "batch evaluation had failures");
    }

    let mut reports = Vec::with_capacity(nets.len());
    let mut failed = 0usize;
    for net in nets.iter_mut() {
        match net.report(input_slew, corners) {
            Ok(report) => reports.push(report),
            Err(e) => {
                tracing::warn!(net = %net.name(), error = %e, "skipping net");
                failed += 1;
            }
        }
    }
    (reports, failed)
}

/// Renders a report as an aligned table.
pub fn render_text(report: &NetReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "net {} (driver {}, input slew {})",
        report.net,
        report.driver.as_deref().unwrap_or("-"),
        report.input_slew
    );
    let _ = write!(out, "  load");
    for (corner, load) in report.load.iter() {
        let _ = write!(out, "  {corner}={load:.4}");
    }
    out.push('\n');

    if report.sinks.is_empty() {
        out.push_str("  (no sinks)\n");
        return out;
    }
    let width = report
        .sinks
        .iter()
        .map(|s| s.terminal.len())
        .max()
        .unwrap_or(0)
        .max("sink".len());
    let _ = writeln!(
        out,
        "  {:<width$}  {:<8}  {:>12}  {:>12}",
        "sink", "corner", "delay", "slew"
    );
    for sink in &report.sinks {
        let _ = writeln!(
            out,
            "  {:<width$}  {:<8}  {:>12.4}  {:>12.4}",
            sink.terminal,
            sink.corner.to_string(),
            sink.delay,
            sink.slew
        );
    }
    out
}
