//! Gate decision and report rendering.
//!
//! The pass/fail decision is computed exactly once, in [`GateDecision::decide`];
//! both renderers and the exit code read it from there.

use crate::core::error::GateError;
use crate::core::output;
use crate::core::ratchet::{RatchetOutcome, format_score};
use crate::core::score::GateReport;
use colored::Colorize;
use serde::Serialize;

/// Default minimum composite score.
pub const DEFAULT_THRESHOLD: u32 = 70;

const MAX_FINDINGS_SHOWN: usize = 5;
const MAX_FINDING_CHARS: usize = 110;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub score: u32,
    pub threshold: u32,
    pub threshold_met: bool,
    pub ratchet: RatchetOutcome,
    pub passed: bool,
}

impl GateDecision {
    pub fn decide(report: &GateReport, ratchet: RatchetOutcome, threshold: u32) -> Self {
        let threshold_met = report.total_weighted_score >= threshold;
        let passed = threshold_met && ratchet.passed;
        Self {
            score: report.total_weighted_score,
            threshold,
            threshold_met,
            ratchet,
            passed,
        }
    }

    pub fn exit_code(&self) -> u8 {
        if self.passed { 0 } else { 1 }
    }

    pub fn status_label(&self) -> &'static str {
        if self.passed { "PASSED" } else { "FAILED" }
    }
}

/// Output format for gate results.
pub trait Reporter {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &GateReport, decision: &GateDecision) -> Result<String, GateError>;
}

pub fn create_reporter(json: bool, timestamp: String) -> Box<dyn Reporter> {
    if json {
        Box::new(JsonReporter { timestamp })
    } else {
        Box::new(ConsoleReporter)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonCheck<'a> {
    name: &'a str,
    score: f64,
    weight: u32,
    weighted_score: u32,
    errors: usize,
    warnings: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    score: u32,
    threshold: u32,
    passed: bool,
    ratchet: &'a RatchetOutcome,
    checks: Vec<JsonCheck<'a>>,
    total_errors: usize,
    total_warnings: usize,
    timestamp: &'a str,
}

/// Machine-readable report for CI.
pub struct JsonReporter {
    pub timestamp: String,
}

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &GateReport, decision: &GateDecision) -> Result<String, GateError> {
        let doc = JsonReport {
            score: decision.score,
            threshold: decision.threshold,
            passed: decision.passed,
            ratchet: &decision.ratchet,
            checks: report
                .results
                .iter()
                .map(|r| JsonCheck {
                    name: r.name(),
                    score: r.score(),
                    weight: r.weight,
                    weighted_score: r.weighted_score,
                    errors: r.result.errors.len(),
                    warnings: r.result.warnings.len(),
                })
                .collect(),
            total_errors: report.total_errors,
            total_warnings: report.total_warnings,
            timestamp: &self.timestamp,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

/// Human-readable terminal report.
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn findings(out: &mut String, label: &str, messages: &[String]) {
        for message in messages.iter().take(MAX_FINDINGS_SHOWN) {
            out.push_str(&format!(
                "      {} {}\n",
                label,
                output::compact_line(message, MAX_FINDING_CHARS)
            ));
        }
        if messages.len() > MAX_FINDINGS_SHOWN {
            out.push_str(&format!(
                "      {}\n",
                format!("(+{} more)", messages.len() - MAX_FINDINGS_SHOWN).dimmed()
            ));
        }
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &GateReport, decision: &GateDecision) -> Result<String, GateError> {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Quality Gate Report".bold()));
        out.push_str(&format!("{}\n", "─".repeat(48)));

        let name_width = report
            .results
            .iter()
            .map(|r| r.name().chars().count())
            .max()
            .unwrap_or(0);

        for r in &report.results {
            let symbol = if r.result.errors.is_empty() {
                "✓".bright_green()
            } else {
                "✗".bright_red()
            };
            out.push_str(&format!(
                "  {} {:<width$}  {:>6}  {:>3}/{:<3}\n",
                symbol,
                r.name(),
                format_score(r.score()),
                r.weighted_score,
                r.weight,
                width = name_width
            ));
            Self::findings(&mut out, &"error:".red().to_string(), &r.result.errors);
            Self::findings(&mut out, &"warning:".yellow().to_string(), &r.result.warnings);
        }

        out.push_str(&format!("{}\n", "─".repeat(48)));
        let score_line = format!("{}/100", decision.score);
        out.push_str(&format!(
            "Score: {} (threshold {})\n",
            if decision.threshold_met {
                score_line.bright_green()
            } else {
                score_line.bright_red()
            },
            decision.threshold
        ));
        out.push_str(&format!(
            "Errors: {}  Warnings: {}\n",
            report.total_errors, report.total_warnings
        ));

        if decision.ratchet.passed {
            out.push_str(&format!("Ratchet: {}\n", "OK".bright_green()));
        } else {
            out.push_str(&format!("Ratchet: {}\n", "REGRESSED".bright_red()));
            for regression in &decision.ratchet.regressions {
                out.push_str(&format!("  - {}\n", regression));
            }
        }

        let status = if decision.passed {
            decision.status_label().bright_green().bold()
        } else {
            decision.status_label().bright_red().bold()
        };
        out.push_str(&format!("Status: {}\n", status));
        Ok(out)
    }
}
