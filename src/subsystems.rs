//! Check registration: the static, ordered list of built-in checks.
//!
//! Adding a check: append one entry to `CHECKS` and rebalance the weights so
//! they still sum to 100. Order here is report order.

use crate::core::check::Check;
use crate::core::config::GateConfig;
use crate::core::error::GateError;
use crate::core::registry::{CheckRegistry, RegisteredCheck};
use crate::core::workspace::SourceTree;
use crate::plugins::{
    ConflictMarkersCheck, FinalNewlineCheck, FixmeMarkersCheck, LongLinesCheck,
    TrailingWhitespaceCheck,
};
use std::path::Path;
use std::sync::Arc;

pub struct CheckEntry {
    pub id: &'static str,
    pub weight: u32,
    pub build: fn(SourceTree, &GateConfig) -> Arc<dyn Check>,
}

pub const CHECKS: &[CheckEntry] = &[
    CheckEntry { id: "conflict-markers", weight: 30, build: conflict_markers },
    CheckEntry { id: "trailing-whitespace", weight: 20, build: trailing_whitespace },
    CheckEntry { id: "final-newline", weight: 15, build: final_newline },
    CheckEntry { id: "long-lines", weight: 20, build: long_lines },
    CheckEntry { id: "fixme-markers", weight: 15, build: fixme_markers },
];

fn conflict_markers(tree: SourceTree, _: &GateConfig) -> Arc<dyn Check> {
    Arc::new(ConflictMarkersCheck::new(tree))
}

fn trailing_whitespace(tree: SourceTree, _: &GateConfig) -> Arc<dyn Check> {
    Arc::new(TrailingWhitespaceCheck::new(tree))
}

fn final_newline(tree: SourceTree, _: &GateConfig) -> Arc<dyn Check> {
    Arc::new(FinalNewlineCheck::new(tree))
}

fn long_lines(tree: SourceTree, config: &GateConfig) -> Arc<dyn Check> {
    Arc::new(LongLinesCheck::new(tree, config.max_line_length))
}

fn fixme_markers(tree: SourceTree, _: &GateConfig) -> Arc<dyn Check> {
    Arc::new(FixmeMarkersCheck::new(tree))
}

/// Build the registry for `root`, applying `[weights]` overrides from config.
pub fn build_registry(root: &Path, config: &GateConfig) -> Result<CheckRegistry, GateError> {
    if let Some(unknown) = config
        .weights
        .keys()
        .find(|id| !CHECKS.iter().any(|c| c.id == id.as_str()))
    {
        return Err(GateError::Config(format!(
            "weight override for unknown check '{}'",
            unknown
        )));
    }

    let tree = SourceTree::new(root, config);
    let entries = CHECKS
        .iter()
        .map(|entry| {
            let weight = config.weights.get(entry.id).copied().unwrap_or(entry.weight);
            RegisteredCheck::new((entry.build)(tree.clone(), config), weight)
        })
        .collect();

    CheckRegistry::new(entries).map_err(|e| match e {
        GateError::Registry(msg) if !config.weights.is_empty() => {
            GateError::Config(format!("[weights] overrides are invalid: {}", msg))
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_weights_sum_to_100() {
        let total: u32 = CHECKS.iter().map(|c| c.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn built_ids_match_entries() {
        let registry = build_registry(Path::new("."), &GateConfig::default()).unwrap();
        let ids: Vec<_> = registry.iter().map(|c| c.check.id()).collect();
        let expected: Vec<_> = CHECKS.iter().map(|c| c.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn only_whitespace_checks_are_fixable() {
        let registry = build_registry(Path::new("."), &GateConfig::default()).unwrap();
        let fixable: Vec<_> = registry
            .iter()
            .filter(|c| c.check.fixable())
            .map(|c| c.check.id())
            .collect();
        assert_eq!(fixable, vec!["trailing-whitespace", "final-newline"]);
    }

    #[test]
    fn weight_overrides_must_keep_sum() {
        let mut config = GateConfig::default();
        config.weights.insert("long-lines".into(), 10);
        assert!(matches!(build_registry(Path::new("."), &config), Err(GateError::Config(_))));

        config.weights.insert("fixme-markers".into(), 25);
        let registry = build_registry(Path::new("."), &config).unwrap();
        assert_eq!(registry.get("long-lines").map(|c| c.weight), Some(10));
    }

    #[test]
    fn unknown_override_is_rejected() {
        let mut config = GateConfig::default();
        config.weights.insert("bundle-size".into(), 0);
        let err = build_registry(Path::new("."), &config).unwrap_err();
        assert!(err.to_string().contains("bundle-size"));
    }
}
