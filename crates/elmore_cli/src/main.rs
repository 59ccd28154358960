//! Elmore CLI — interconnect delay and slew reports from parasitic payloads.
//!
//! Provides `elmore report` for per-sink Elmore delay and slew of one or more
//! nets, and `elmore check` for structural validation of their RC trees.

#![warn(missing_docs)]

mod check;
mod pipeline;
mod report;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Elmore — RC-tree interconnect timing.
#[derive(Parser, Debug)]
#[command(name = "elmore", version, about = "RC-tree interconnect timing")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `elmore.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report driver load and per-sink delay and slew.
    Report(ReportArgs),
    /// Check the RC trees built from a payload for structural problems.
    Check(CheckArgs),
}

/// Arguments for the `elmore report` subcommand.
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// JSON file holding one parasitic net or a list of them.
    pub payload: String,

    /// Driver node name (default: the first node of each payload).
    #[arg(short, long)]
    pub driver: Option<String>,

    /// Sink node names (default: every leaf of the tree).
    #[arg(short, long)]
    pub sink: Vec<String>,

    /// Input slew at the driver, overriding the configured value.
    #[arg(long)]
    pub input_slew: Option<f64>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `elmore check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// JSON file holding one parasitic net or a list of them.
    pub payload: String,

    /// Driver node name used to orient each tree.
    #[arg(short, long)]
    pub driver: Option<String>,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// Default log filter implied by the verbosity flags.
    fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    // RUST_LOG takes precedence over the flags.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(global.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Report(ref args) => report::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
