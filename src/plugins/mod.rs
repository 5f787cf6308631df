//! Built-in checks.
//!
//! Generic text-level analyzers over the scanned tree. Each scores the share
//! of scanned files that comply; an empty tree scores 100.

pub mod conflict_markers;
pub mod final_newline;
pub mod fixme_markers;
pub mod long_lines;
pub mod trailing_whitespace;

pub use conflict_markers::ConflictMarkersCheck;
pub use final_newline::FinalNewlineCheck;
pub use fixme_markers::FixmeMarkersCheck;
pub use long_lines::LongLinesCheck;
pub use trailing_whitespace::TrailingWhitespaceCheck;
