//! Final Newline: non-empty text files must end with a newline. Fixable.

use crate::core::check::{Check, CheckOptions, CheckResult, compliance_percent};
use crate::core::workspace::{SourceTree, read_text};
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::Write;

pub struct FinalNewlineCheck {
    tree: SourceTree,
}

impl FinalNewlineCheck {
    pub fn new(tree: SourceTree) -> Self {
        Self { tree }
    }
}

fn missing_final_newline(content: &str) -> bool {
    !content.is_empty() && !content.ends_with('\n')
}

impl Check for FinalNewlineCheck {
    fn id(&self) -> &'static str {
        "final-newline"
    }

    fn name(&self) -> &'static str {
        "Final Newline"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn run(&self, options: CheckOptions) -> anyhow::Result<CheckResult> {
        let mut scanned = 0;
        let mut fixed = 0;
        let mut errors = Vec::new();

        for path in self.tree.files()? {
            let Some(content) = read_text(&path)? else {
                continue;
            };
            scanned += 1;
            if !missing_final_newline(&content) {
                continue;
            }
            if options.fix {
                let mut file = OpenOptions::new()
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("opening {}", path.display()))?;
                file.write_all(b"\n")
                    .with_context(|| format!("appending to {}", path.display()))?;
                fixed += 1;
                continue;
            }
            errors.push(format!("{}: no newline at end of file", self.tree.display(&path)));
        }

        let flagged = errors.len();
        let mut result = CheckResult::new(self.name(), compliance_percent(scanned - flagged, scanned))
            .with_errors(errors)
            .with_stat("files_scanned", scanned)
            .with_stat("files_flagged", flagged);
        if options.fix {
            result = result.with_stat("files_fixed", fixed);
        }
        Ok(result)
    }
}
