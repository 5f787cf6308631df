//! Append-only run history (`history.jsonl`), one line per invocation.

use crate::core::error::GateError;
use crate::core::report::GateDecision;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub ts: String,
    pub run_id: String,
    pub score: u32,
    pub threshold: u32,
    pub passed: bool,
    pub fix: bool,
    pub ratchet_passed: bool,
    pub regressions: Vec<String>,
}

impl HistoryEntry {
    pub fn new(ts: String, run_id: String, decision: &GateDecision, fix: bool) -> Self {
        Self {
            ts,
            run_id,
            score: decision.score,
            threshold: decision.threshold,
            passed: decision.passed,
            fix,
            ratchet_passed: decision.ratchet.passed,
            regressions: decision.ratchet.regressions.clone(),
        }
    }
}

pub fn append_history(path: &Path, entry: &HistoryEntry) -> Result<(), GateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut line = serde_json::to_string(entry)?;
    line.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}
