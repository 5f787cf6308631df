//! quality-gate: a weighted, ratcheted compliance gate for source trees.
//!
//! **Run a fixed set of checks, fold them into one score, never go backwards.**
//!
//! Each check is a trusted in-process analyzer that scores one concern from
//! 0 to 100. The gate weights those scores into a composite out of 100,
//! compares it with a persisted high-water mark (the ratchet), and exits
//! non-zero if the composite is under the threshold or anything regressed.
//!
//! # Core Rules
//!
//! - **Crash isolation**: a check that errors or panics scores 0 with a
//!   `"Check crashed: ..."` error; every other check is unaffected.
//! - **Weights sum to 100**: the registry refuses to build otherwise.
//! - **Ratchet**: neither the total nor any previously tracked check may drop;
//!   the stored baseline is only ever raised.
//! - **Fix then verify**: `--fix` runs a mutate pass whose results are
//!   discarded, then a clean read-only pass that is the one reported.
//! - **One decision**: `passed = score >= threshold && ratchet.passed`,
//!   shared by the console report, the JSON report and the exit code.
//!
//! # Examples
//!
//! ```bash
//! # Score the current directory against the default threshold (70)
//! quality-gate
//!
//! # Machine-readable output for CI
//! quality-gate --json --threshold=80
//!
//! # Apply automatic fixes, then verify
//! quality-gate --fix
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: check contract, runner, scoring, ratchet, fix mode, reporting
//! - [`plugins`]: the built-in checks
//! - [`subsystems`]: the ordered registration list of built-in checks

pub mod cli;
pub mod core;
pub mod plugins;
pub mod subsystems;

use crate::cli::Cli;
use crate::core::config::{self, GateConfig};
use crate::core::error::GateError;
use crate::core::gate::{GateRun, GateSettings, run_gate};
use crate::core::history::{self, HistoryEntry};
use crate::core::logging;
use crate::core::ratchet::FileBaselineStore;
use crate::core::registry::CheckRegistry;
use crate::core::report;
use crate::core::time;
use clap::Parser;
use std::path::Path;

/// Parse the process arguments, run the gate, and return the exit code.
pub fn run() -> u8 {
    let cli = Cli::parse();
    logging::init_logging();
    run_with(&cli)
}

/// Run the gate for already-parsed arguments. Never panics on gate errors:
/// any failure is rendered (as JSON with `--json`) and yields exit code 1.
pub fn run_with(cli: &Cli) -> u8 {
    match execute(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "quality gate aborted");
            if cli.json {
                let doc = serde_json::json!({
                    "passed": false,
                    "error": err.to_string(),
                    "timestamp": time::now_iso(),
                });
                println!("{}", doc);
            } else {
                eprintln!("quality-gate: error: {}", err);
            }
            1
        }
    }
}

fn execute(cli: &Cli) -> Result<u8, GateError> {
    let root = match &cli.root {
        Some(r) => r.clone(),
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(GateError::Config(format!(
            "root is not a directory: {}",
            root.display()
        )));
    }

    let config = config::load_config(&root, cli.config.as_deref())?;
    let registry = subsystems::build_registry(&root, &config)?;

    if cli.list {
        print!("{}", render_check_list(&registry));
        return Ok(0);
    }

    let baseline_path = cli
        .baseline
        .clone()
        .unwrap_or_else(|| config.baseline_path(&root));
    let store = FileBaselineStore::new(baseline_path);
    let settings = settings_for(cli, &config);

    let run = run_gate(&registry, &store, &settings);

    if config.record_history {
        record_history(&config.history_path(&root), &run, cli.fix);
    }

    let reporter = report::create_reporter(cli.json, run.timestamp.clone());
    tracing::debug!(reporter = reporter.name(), "rendering report");
    let rendered = reporter.generate(&run.report, &run.decision)?;
    if cli.json {
        println!("{}", rendered);
    } else {
        print!("{}", rendered);
        if let Some(saved) = &run.saved {
            println!("Baseline: {}", saved);
        }
    }

    Ok(run.decision.exit_code())
}

fn settings_for(cli: &Cli, config: &GateConfig) -> GateSettings {
    GateSettings {
        threshold: cli.threshold.unwrap_or(config.threshold),
        fix: cli.fix,
        save_baseline: !cli.no_save,
        parallel_verify: config.parallel_verify,
        check_timeout: config.check_timeout(),
    }
}

fn record_history(path: &Path, run: &GateRun, fix: bool) {
    let entry = HistoryEntry::new(run.timestamp.clone(), time::new_run_id(), &run.decision, fix);
    if let Err(e) = history::append_history(path, &entry) {
        tracing::warn!(path = %path.display(), error = %e, "failed to append run history");
    }
}

fn render_check_list(registry: &CheckRegistry) -> String {
    let mut out = String::new();
    for entry in registry.iter() {
        out.push_str(&format!(
            "{:<22} {:>3}  {}{}\n",
            entry.check.id(),
            entry.weight,
            entry.check.name(),
            if entry.check.fixable() { " (fixable)" } else { "" }
        ));
    }
    out
}
