//! One gate invocation, end to end.
//!
//! load baseline → (mutate pass) → verify pass → aggregate → compare →
//! decide → save (at most once). Every failure inside resolves to a report;
//! nothing here returns an error.

use crate::core::fix::FixOrchestrator;
use crate::core::ratchet::{BaselineStore, Ratchet, SaveOutcome};
use crate::core::registry::CheckRegistry;
use crate::core::report::{DEFAULT_THRESHOLD, GateDecision};
use crate::core::runner::CheckRunner;
use crate::core::score::GateReport;
use crate::core::time;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GateSettings {
    pub threshold: u32,
    pub fix: bool,
    pub save_baseline: bool,
    pub parallel_verify: bool,
    pub check_timeout: Option<Duration>,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            fix: false,
            save_baseline: true,
            parallel_verify: false,
            check_timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateRun {
    pub report: GateReport,
    pub decision: GateDecision,
    /// `None` when saving was disabled or the write failed.
    pub saved: Option<SaveOutcome>,
    pub timestamp: String,
}

pub fn run_gate(
    registry: &CheckRegistry,
    store: &dyn BaselineStore,
    settings: &GateSettings,
) -> GateRun {
    let ratchet = Ratchet::load(store);

    let runner = CheckRunner::new(registry)
        .parallel(settings.parallel_verify)
        .with_timeout(settings.check_timeout);
    let report = FixOrchestrator::new(&runner).run(settings.fix);

    let outcome = ratchet.compare(&report);
    let decision = GateDecision::decide(&report, outcome, settings.threshold);
    let timestamp = time::now_iso();

    let saved = if settings.save_baseline {
        match ratchet.save(&report, timestamp.clone()) {
            Ok(outcome) => {
                tracing::info!(store = %store.describe(), "{}", outcome);
                Some(outcome)
            }
            Err(e) => {
                tracing::warn!(store = %store.describe(), error = %e, "failed to write ratchet baseline");
                None
            }
        }
    } else {
        None
    };

    tracing::info!(
        score = decision.score,
        threshold = decision.threshold,
        ratchet_passed = decision.ratchet.passed,
        passed = decision.passed,
        "gate finished"
    );

    GateRun {
        report,
        decision,
        saved,
        timestamp,
    }
}
