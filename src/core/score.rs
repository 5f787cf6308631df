//! Composite scoring.
//!
//! Each check is rounded to an integer contribution first, then contributions
//! are summed. Rounding the sum of unrounded contributions would differ by a
//! point or two in some cases; the per-check rounding is kept so that the score
//! shown next to each check adds up to the total exactly.

use crate::core::check::WeightedResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTotals {
    pub total_weighted_score: u32,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Outcome of one verify pass, ready for the ratchet and the reporter.
#[derive(Debug, Clone, PartialEq)]
pub struct GateReport {
    pub results: Vec<WeightedResult>,
    pub total_weighted_score: u32,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl GateReport {
    pub fn from_results(results: Vec<WeightedResult>) -> Self {
        let totals = ScoreAggregator::totals(&results);
        Self {
            results,
            total_weighted_score: totals.total_weighted_score,
            total_errors: totals.total_errors,
            total_warnings: totals.total_warnings,
        }
    }
}

pub struct ScoreAggregator;

impl ScoreAggregator {
    /// Order-independent fold over weighted results.
    pub fn totals(results: &[WeightedResult]) -> ScoreTotals {
        results.iter().fold(ScoreTotals::default(), |acc, r| ScoreTotals {
            total_weighted_score: acc.total_weighted_score + r.weighted_score,
            total_errors: acc.total_errors + r.result.errors.len(),
            total_warnings: acc.total_warnings + r.result.warnings.len(),
        })
    }
}
