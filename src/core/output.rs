//! Terminal-friendly rendering of check findings.
//!
//! Findings come from arbitrary analyzers and may span lines or run long; the
//! console report shows each on a single bounded line.

/// Fold all whitespace runs into single spaces and cap the result at
/// `max_chars` characters, marking truncation with `...`.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let mut words = input.split_whitespace();
    let mut line = String::new();
    if let Some(first) = words.next() {
        line.push_str(first);
        for word in words {
            line.push(' ');
            line.push_str(word);
        }
    }

    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &line[..cut]),
        None => line,
    }
}
