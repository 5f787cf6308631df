//! Fix mode: mutate, then verify.
//!
//! The mutate pass runs every check with `fix=true` (the runner downgrades
//! non-fixable checks to `fix=false`) strictly in sequence, and its results
//! are thrown away. The verify pass then re-runs everything read-only; only
//! its results are scored. A fix applied by one check can change what another
//! check sees, so the mutate pass numbers are never trusted.

use crate::core::check::CheckOptions;
use crate::core::runner::CheckRunner;
use crate::core::score::GateReport;

pub struct FixOrchestrator<'r, 'a> {
    runner: &'r CheckRunner<'a>,
}

impl<'r, 'a> FixOrchestrator<'r, 'a> {
    pub fn new(runner: &'r CheckRunner<'a>) -> Self {
        Self { runner }
    }

    /// Run the gate, with a mutate pass first when `fix` is set.
    pub fn run(&self, fix: bool) -> GateReport {
        if fix {
            self.mutate();
        }
        let results = self.runner.run_pass(CheckOptions::VERIFY);
        GateReport::from_results(results)
    }

    fn mutate(&self) {
        let fixable = self
            .runner
            .registry()
            .iter()
            .filter(|c| c.check.fixable())
            .count();
        tracing::info!(fixable, "starting mutate pass");
        // The mutate pass runs sequentially and returns only after every
        // check has finished writing.
        let discarded = self.runner.run_pass(CheckOptions::FIX);
        tracing::debug!(checks = discarded.len(), "mutate pass finished, results discarded");
    }
}
