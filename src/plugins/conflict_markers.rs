//! Conflict Markers: unresolved merge conflicts left in source files.

use crate::core::check::{Check, CheckOptions, CheckResult, compliance_percent};
use crate::core::workspace::{SourceTree, read_text};

pub struct ConflictMarkersCheck {
    tree: SourceTree,
}

impl ConflictMarkersCheck {
    pub fn new(tree: SourceTree) -> Self {
        Self { tree }
    }
}

fn is_marker(line: &str) -> bool {
    let line = line.trim_end_matches('\r');
    ["<<<<<<<", ">>>>>>>"]
        .iter()
        .any(|m| line == *m || line.strip_prefix(m).is_some_and(|rest| rest.starts_with(' ')))
}

impl Check for ConflictMarkersCheck {
    fn id(&self) -> &'static str {
        "conflict-markers"
    }

    fn name(&self) -> &'static str {
        "Conflict Markers"
    }

    fn run(&self, _options: CheckOptions) -> anyhow::Result<CheckResult> {
        let mut scanned = 0;
        let mut errors = Vec::new();

        for path in self.tree.files()? {
            let Some(content) = read_text(&path)? else {
                continue;
            };
            scanned += 1;
            if let Some((idx, _)) = content.lines().enumerate().find(|(_, l)| is_marker(l)) {
                errors.push(format!(
                    "{}:{}: unresolved merge conflict marker",
                    self.tree.display(&path),
                    idx + 1
                ));
            }
        }

        let flagged = errors.len();
        Ok(CheckResult::new(self.name(), compliance_percent(scanned - flagged, scanned))
            .with_errors(errors)
            .with_stat("files_scanned", scanned)
            .with_stat("files_flagged", flagged))
    }
}
