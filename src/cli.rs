//! CLI struct definitions for the `quality-gate` command-line interface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "quality-gate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run the compliance checks over a source tree, score them, and fail on regressions."
)]
pub struct Cli {
    /// Minimum composite score (0-100) required to pass. Defaults to 70 or the config value.
    #[clap(long, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub threshold: Option<u32>,
    /// Print the machine-readable JSON report instead of the console report.
    #[clap(long)]
    pub json: bool,
    /// Apply automatic fixes, then verify with a clean pass.
    #[clap(long)]
    pub fix: bool,
    /// Directory to scan (defaults to the current working directory).
    #[clap(long)]
    pub root: Option<PathBuf>,
    /// Config file (defaults to `<root>/.quality-gate.toml` when present).
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Ratchet baseline file (defaults to `<root>/.quality-gate/ratchet.json`).
    #[clap(long)]
    pub baseline: Option<PathBuf>,
    /// Compare against the baseline but never write it.
    #[clap(long)]
    pub no_save: bool,
    /// List the registered checks and exit.
    #[clap(long)]
    pub list: bool,
}
