//! Fixme Markers: `FIXME`/`XXX` block; `TODO` is advisory only.

use crate::core::check::{Check, CheckOptions, CheckResult, compliance_percent};
use crate::core::workspace::{SourceTree, read_text};
use regex::Regex;
use std::sync::LazyLock;

static BLOCKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(FIXME|XXX)\b").expect("valid FIXME pattern"));
static ADVISORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bTODO\b").expect("valid TODO pattern"));

pub struct FixmeMarkersCheck {
    tree: SourceTree,
}

impl FixmeMarkersCheck {
    pub fn new(tree: SourceTree) -> Self {
        Self { tree }
    }
}

impl Check for FixmeMarkersCheck {
    fn id(&self) -> &'static str {
        "fixme-markers"
    }

    fn name(&self) -> &'static str {
        "Fixme Markers"
    }

    fn run(&self, _options: CheckOptions) -> anyhow::Result<CheckResult> {
        let mut scanned = 0;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for path in self.tree.files()? {
            let Some(content) = read_text(&path)? else {
                continue;
            };
            scanned += 1;
            let shown = self.tree.display(&path);

            let blocking: Vec<usize> = content
                .lines()
                .enumerate()
                .filter(|(_, l)| BLOCKING.is_match(l))
                .map(|(i, _)| i + 1)
                .collect();
            if let Some(first) = blocking.first() {
                errors.push(format!(
                    "{}:{}: {} FIXME/XXX marker(s)",
                    shown,
                    first,
                    blocking.len()
                ));
            }

            let todos = content.lines().filter(|l| ADVISORY.is_match(l)).count();
            if todos > 0 {
                warnings.push(format!("{}: {} TODO marker(s)", shown, todos));
            }
        }

        // Score reflects blocking markers only.
        let flagged = errors.len();
        Ok(CheckResult::new(self.name(), compliance_percent(scanned - flagged, scanned))
            .with_errors(errors)
            .with_warnings(warnings)
            .with_stat("files_scanned", scanned)
            .with_stat("files_flagged", flagged))
    }
}
