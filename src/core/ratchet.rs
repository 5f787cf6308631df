//! Score ratchet: a persisted high-water mark the gate may never fall below.
//!
//! Lifecycle within one invocation: [`Ratchet::load`] reads the baseline once,
//! [`Ratchet::compare`] judges the current report against it, and
//! [`Ratchet::save`] (which consumes the ratchet) writes at most once.
//!
//! Rules:
//! - No baseline means no history: the run passes the ratchet and seeds it.
//! - The total may not drop below the stored total.
//! - No check with history may drop below its stored score, even when other
//!   checks improved enough to raise the total.
//! - Checks without history (new) or without a current result (removed) are
//!   never regressions.
//! - The stored baseline is only replaced by one with an equal or higher total.

use crate::core::error::GateError;
use crate::core::score::GateReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Default baseline location, relative to the scanned root.
pub const DEFAULT_BASELINE_PATH: &str = ".quality-gate/ratchet.json";

/// Scores closer than this are equal; absorbs float noise from a JSON round trip.
const SCORE_TOLERANCE: f64 = 1e-9;

fn dropped(previous: f64, current: f64) -> bool {
    previous - current > SCORE_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatchetBaseline {
    pub total_score: f64,
    pub updated_at: String,
    #[serde(default)]
    pub checks: BTreeMap<String, BaselineCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineCheck {
    pub score: f64,
    #[serde(default)]
    pub errors: u64,
    #[serde(default)]
    pub warnings: u64,
}

impl RatchetBaseline {
    pub fn from_report(report: &GateReport, updated_at: String) -> Self {
        let checks = report
            .results
            .iter()
            .map(|r| {
                (
                    r.name().to_string(),
                    BaselineCheck {
                        score: r.score(),
                        errors: r.result.errors.len() as u64,
                        warnings: r.result.warnings.len() as u64,
                    },
                )
            })
            .collect();
        Self {
            total_score: f64::from(report.total_weighted_score),
            updated_at,
            checks,
        }
    }
}

/// Where a baseline lives. Loading never fails: anything unreadable is "no history".
pub trait BaselineStore: Send + Sync {
    fn load(&self) -> Option<RatchetBaseline>;
    fn store(&self, baseline: &RatchetBaseline) -> Result<(), GateError>;
    fn describe(&self) -> String;
}

/// JSON file store with atomic replace-on-write.
#[derive(Debug, Clone)]
pub struct FileBaselineStore {
    path: PathBuf,
}

impl FileBaselineStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "ratchet.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

impl BaselineStore for FileBaselineStore {
    fn load(&self) -> Option<RatchetBaseline> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no ratchet baseline yet");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ratchet baseline unreadable, ignoring");
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(baseline) => Some(baseline),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ratchet baseline malformed, ignoring");
                None
            }
        }
    }

    fn store(&self, baseline: &RatchetBaseline) -> Result<(), GateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write aside then swap, so a concurrent reader never sees a torn file.
        let tmp = self.temp_path();
        let mut body = serde_json::to_string_pretty(baseline)?;
        body.push('\n');
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBaselineStore {
    baseline: Mutex<Option<RatchetBaseline>>,
    writes: Mutex<usize>,
}

impl MemoryBaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_baseline(baseline: RatchetBaseline) -> Self {
        Self {
            baseline: Mutex::new(Some(baseline)),
            writes: Mutex::new(0),
        }
    }

    pub fn current(&self) -> Option<RatchetBaseline> {
        self.baseline.lock().ok().and_then(|b| b.clone())
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }
}

impl BaselineStore for MemoryBaselineStore {
    fn load(&self) -> Option<RatchetBaseline> {
        self.current()
    }

    fn store(&self, baseline: &RatchetBaseline) -> Result<(), GateError> {
        let mut slot = self
            .baseline
            .lock()
            .map_err(|_| GateError::Io(std::io::Error::other("baseline lock poisoned")))?;
        *slot = Some(baseline.clone());
        if let Ok(mut writes) = self.writes.lock() {
            *writes += 1;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatchetOutcome {
    pub passed: bool,
    pub regressions: Vec<String>,
}

impl RatchetOutcome {
    pub fn clean() -> Self {
        Self {
            passed: true,
            regressions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// No baseline existed; this run seeded it.
    Created { total: f64 },
    /// The new total was equal or higher and replaced the stored one.
    Raised { from: f64, to: f64 },
    /// The new total was lower; the stored baseline was left alone.
    Kept { stored: f64, current: f64 },
}

impl std::fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { total } => write!(f, "baseline created at {}", format_score(*total)),
            Self::Raised { from, to } => write!(
                f,
                "baseline updated {} -> {}",
                format_score(*from),
                format_score(*to)
            ),
            Self::Kept { stored, current } => write!(
                f,
                "baseline kept at {} (run scored {})",
                format_score(*stored),
                format_score(*current)
            ),
        }
    }
}

pub struct Ratchet<'a> {
    store: &'a dyn BaselineStore,
    baseline: Option<RatchetBaseline>,
}

impl<'a> Ratchet<'a> {
    pub fn load(store: &'a dyn BaselineStore) -> Self {
        let baseline = store.load();
        tracing::debug!(
            store = %store.describe(),
            found = baseline.is_some(),
            "ratchet baseline loaded"
        );
        Self { store, baseline }
    }

    pub fn compare(&self, report: &GateReport) -> RatchetOutcome {
        let Some(baseline) = &self.baseline else {
            return RatchetOutcome::clean();
        };

        let mut regressions = Vec::new();
        let current_total = f64::from(report.total_weighted_score);
        if dropped(baseline.total_score, current_total) {
            regressions.push(format!(
                "Total score dropped from {} to {}",
                format_score(baseline.total_score),
                report.total_weighted_score
            ));
        }

        for result in &report.results {
            if let Some(previous) = baseline.checks.get(result.name())
                && dropped(previous.score, result.score())
            {
                regressions.push(format!(
                    "{}: score dropped from {} to {}",
                    result.name(),
                    format_score(previous.score),
                    format_score(result.score())
                ));
            }
        }

        RatchetOutcome {
            passed: regressions.is_empty(),
            regressions,
        }
    }

    /// Persist the report as the new baseline unless that would lower it.
    pub fn save(self, report: &GateReport, updated_at: String) -> Result<SaveOutcome, GateError> {
        let next = RatchetBaseline::from_report(report, updated_at);
        let outcome = match &self.baseline {
            None => SaveOutcome::Created {
                total: next.total_score,
            },
            Some(stored) if next.total_score >= stored.total_score => SaveOutcome::Raised {
                from: stored.total_score,
                to: next.total_score,
            },
            Some(stored) => {
                return Ok(SaveOutcome::Kept {
                    stored: stored.total_score,
                    current: next.total_score,
                });
            }
        };
        self.store.store(&next)?;
        Ok(outcome)
    }
}

/// Render a score without float noise: `80`, `83.33`.
pub fn format_score(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}
