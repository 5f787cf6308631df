//! Source-tree enumeration shared by the built-in checks.
//!
//! Honors `.gitignore` (even outside a git checkout), skips hidden entries
//! (which keeps `.git` and `.quality-gate` out), skips configured directory
//! names, and keeps only configured text extensions.

use crate::core::config::GateConfig;
use anyhow::Context;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    exclude: Vec<String>,
    extensions: Vec<String>,
}

impl SourceTree {
    pub fn new(root: impl Into<PathBuf>, config: &GateConfig) -> Self {
        Self {
            root: root.into(),
            exclude: config.exclude.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// All matching files, sorted for deterministic output.
    pub fn files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let exclude = self.exclude.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .require_git(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && exclude.iter().any(|name| entry.file_name() == name.as_str()))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.with_context(|| format!("walking {}", self.root.display()))?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let matches = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|want| want == ext));
            if matches {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Path relative to the root, for findings.
    pub fn display(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Read a file as UTF-8 text, `None` for binary or otherwise undecodable content.
pub fn read_text(path: &Path) -> anyhow::Result<Option<String>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(String::from_utf8(bytes).ok())
}
