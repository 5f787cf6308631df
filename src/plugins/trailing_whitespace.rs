//! Trailing Whitespace: spaces or tabs before a line ending. Fixable.
//!
//! Markdown is skipped, since two trailing spaces there are a hard line break.

use crate::core::check::{Check, CheckOptions, CheckResult, compliance_percent};
use crate::core::workspace::{SourceTree, read_text};
use anyhow::Context;
use std::fs;

pub struct TrailingWhitespaceCheck {
    tree: SourceTree,
}

impl TrailingWhitespaceCheck {
    pub fn new(tree: SourceTree) -> Self {
        Self { tree }
    }
}

/// Split a line into body and its ending (`\r\n`, `\n`, or nothing).
fn split_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn offending_lines(content: &str) -> usize {
    content
        .split_inclusive('\n')
        .filter(|line| {
            let (body, _) = split_ending(line);
            body.ends_with([' ', '\t'])
        })
        .count()
}

/// Strip trailing spaces and tabs, keeping each line's original ending.
pub(crate) fn strip_trailing(content: &str) -> String {
    content
        .split_inclusive('\n')
        .map(|line| {
            let (body, ending) = split_ending(line);
            format!("{}{}", body.trim_end_matches([' ', '\t']), ending)
        })
        .collect()
}

impl Check for TrailingWhitespaceCheck {
    fn id(&self) -> &'static str {
        "trailing-whitespace"
    }

    fn name(&self) -> &'static str {
        "Trailing Whitespace"
    }

    fn fixable(&self) -> bool {
        true
    }

    fn run(&self, options: CheckOptions) -> anyhow::Result<CheckResult> {
        let mut scanned = 0;
        let mut fixed = 0;
        let mut errors = Vec::new();

        for path in self.tree.files()? {
            if path.extension().is_some_and(|e| e == "md") {
                continue;
            }
            let Some(content) = read_text(&path)? else {
                continue;
            };
            scanned += 1;

            let count = offending_lines(&content);
            if count == 0 {
                continue;
            }
            if options.fix {
                fs::write(&path, strip_trailing(&content))
                    .with_context(|| format!("rewriting {}", path.display()))?;
                fixed += 1;
                continue;
            }
            errors.push(format!(
                "{}: {} line(s) with trailing whitespace",
                self.tree.display(&path),
                count
            ));
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
