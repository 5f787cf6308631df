//! Gate configuration, read from `.quality-gate.toml` at the scanned root.
//!
//! Every field is optional. A missing file means defaults; a malformed file is
//! an error because silently ignoring it would change the gate's verdict.

use crate::core::error::GateError;
use crate::core::ratchet::DEFAULT_BASELINE_PATH;
use crate::core::report::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = ".quality-gate.toml";
pub const DEFAULT_HISTORY_PATH: &str = ".quality-gate/history.jsonl";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub threshold: u32,
    pub baseline: PathBuf,
    pub history: PathBuf,
    pub record_history: bool,
    pub parallel_verify: bool,
    pub check_timeout_secs: Option<u64>,
    /// Directory names skipped wherever they appear.
    pub exclude: Vec<String>,
    /// File extensions (without the dot) the built-in checks read.
    pub extensions: Vec<String>,
    pub max_line_length: usize,
    /// Per-check weight overrides, keyed by check id.
    pub weights: BTreeMap<String, u32>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            baseline: PathBuf::from(DEFAULT_BASELINE_PATH),
            history: PathBuf::from(DEFAULT_HISTORY_PATH),
            record_history: true,
            parallel_verify: false,
            check_timeout_secs: None,
            exclude: ["target", "node_modules", "dist", "build"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: [
                "rs", "toml", "md", "js", "jsx", "ts", "tsx", "mjs", "json", "css", "scss",
                "html", "yml", "yaml", "py", "sh",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            max_line_length: 120,
            weights: BTreeMap::new(),
        }
    }
}

impl GateConfig {
    pub fn from_toml(content: &str) -> Result<Self, GateError> {
        let config: GateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), GateError> {
        if self.threshold > 100 {
            return Err(GateError::Config(format!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }
        if self.max_line_length == 0 {
            return Err(GateError::Config("max_line_length must be positive".into()));
        }
        if self.check_timeout_secs == Some(0) {
            return Err(GateError::Config("check_timeout_secs must be positive".into()));
        }
        Ok(())
    }

    pub fn check_timeout(&self) -> Option<Duration> {
        self.check_timeout_secs.map(Duration::from_secs)
    }

    pub fn baseline_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.baseline)
    }

    pub fn history_path(&self, root: &Path) -> PathBuf {
        resolve(root, &self.history)
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Load config from `explicit` if given (must exist), else `<root>/.quality-gate.toml` if present.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<GateConfig, GateError> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                return Err(GateError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            p.to_path_buf()
        }
        None => {
            let default = root.join(CONFIG_FILE);
            if !default.exists() {
                tracing::debug!("no {} found, using defaults", CONFIG_FILE);
                return Ok(GateConfig::default());
            }
            default
        }
    };

    let content = fs::read_to_string(&path)?;
    let config = GateConfig::from_toml(&content)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}
