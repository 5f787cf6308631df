//! The check contract.
//!
//! A check is a trusted, in-process analyzer over the local source tree. It
//! receives [`CheckOptions`] and hands back a fresh [`CheckResult`]; the runner
//! never mutates what a check returned; weighting produces a separate
//! [`WeightedResult`].
//!
//! Contract for implementors:
//! - `run` must be read-only when `options.fix` is false.
//! - `run` may rewrite files when `options.fix` is true, and is only ever
//!   called that way if [`Check::fixable`] returns true.
//! - `score` is percentage compliance (100 = fully compliant). `errors` are
//!   blocking findings; `warnings` are advisory and must not drive the score.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of every check score.
pub const MAX_SCORE: f64 = 100.0;

/// Options handed to a single check invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckOptions {
    pub fix: bool,
}

impl CheckOptions {
    pub const VERIFY: CheckOptions = CheckOptions { fix: false };
    pub const FIX: CheckOptions = CheckOptions { fix: true };
}

/// Output of one check invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, serde_json::Value>,
}

impl CheckResult {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
            max_score: MAX_SCORE,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: BTreeMap::new(),
        }
    }

    /// Synthetic result for a check that could not produce one of its own.
    ///
    /// `name` is the check's display name rather than its id: the ratchet keys
    /// baselines by name, so a crash lines up with the check's stored score.
    pub fn crashed(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::new(name, 0.0).with_errors(vec![format!("Check crashed: {}", message)])
    }

    /// Synthetic result for a check that exceeded its wall-clock budget.
    pub fn timed_out(name: impl Into<String>, budget: std::time::Duration) -> Self {
        Self::new(name, 0.0).with_errors(vec![format!(
            "Check timed out after {}s",
            budget.as_secs_f64()
        )])
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn with_stat(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.stats.insert(key.to_string(), value.into());
        self
    }
}

/// A named unit of analysis.
pub trait Check: Send + Sync {
    /// Stable kebab-case identifier used by config and `--list`.
    fn id(&self) -> &'static str;

    /// Human-readable name; also the key under which the ratchet tracks it.
    fn name(&self) -> &'static str;

    fn fixable(&self) -> bool {
        false
    }

    fn run(&self, options: CheckOptions) -> anyhow::Result<CheckResult>;
}

/// Percentage of `compliant` out of `total`, 100 when there is nothing to judge.
pub fn compliance_percent(compliant: usize, total: usize) -> f64 {
    if total == 0 {
        return MAX_SCORE;
    }
    (compliant as f64 / total as f64) * MAX_SCORE
}

/// Force a score into `[0, 100]`; NaN becomes 0.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, MAX_SCORE)
    }
}

/// `round(score / 100 * weight)`, computed per check before any summation.
pub fn weighted_score(score: f64, weight: u32) -> u32 {
    ((clamp_score(score) / MAX_SCORE) * f64::from(weight)).round() as u32
}

/// A check result enriched with its registry weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedResult {
    pub result: CheckResult,
    pub weight: u32,
    pub weighted_score: u32,
}

impl WeightedResult {
    pub fn new(result: CheckResult, weight: u32) -> Self {
        let weighted_score = weighted_score(result.score, weight);
        Self {
            result,
            weight,
            weighted_score,
        }
    }

    pub fn name(&self) -> &str {
        &self.result.name
    }

    pub fn score(&self) -> f64 {
        self.result.score
    }
}
