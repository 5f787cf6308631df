//! Long Lines: lines longer than `max_line_length` characters.

use crate::core::check::{Check, CheckOptions, CheckResult, compliance_percent};
use crate::core::workspace::{SourceTree, read_text};

pub struct LongLinesCheck {
    tree: SourceTree,
    max_len: usize,
}

impl LongLinesCheck {
    pub fn new(tree: SourceTree, max_len: usize) -> Self {
        Self { tree, max_len }
    }
}

/// (number of long lines, longest line length)
fn measure(content: &str, max_len: usize) -> (usize, usize) {
    content
        .lines()
        .map(|l| l.chars().count())
        .filter(|&n| n > max_len)
        .fold((0, 0), |(count, longest), n| (count + 1, longest.max(n)))
}

impl Check for LongLinesCheck {
    fn id(&self) -> &'static str {
        "long-lines"
    }

    fn name(&self) -> &'static str {
        "Long Lines"
    }

    fn run(&self, _options: CheckOptions) -> anyhow::Result<CheckResult> {
        let mut scanned = 0;
        let mut errors = Vec::new();

        for path in self.tree.files()? {
            // Prose and data files wrap or are generated; don't judge them.
            if path.extension().is_some_and(|e| e == "md" || e == "json") {
                continue;
            }
            let Some(content) = read_text(&path)? else {
                continue;
            };
            scanned += 1;
            let (count, longest) = measure(&content, self.max_len);
            if count > 0 {
                errors.push(format!(
                    "{}: {} line(s) over {} characters (longest {})",
                    self.tree.display(&path),
                    count,
                    self.max_len,
                    longest
                ));
            }
        }

        let flagged = errors.len();
        Ok(CheckResult::new(self.name(), compliance_percent(scanned - flagged, scanned))
            .with_errors(errors)
            .with_stat("files_scanned", scanned)
            .with_stat("files_flagged", flagged)
            .with_stat("max_line_length", self.max_len))
    }
}
