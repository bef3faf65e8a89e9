use std::fmt;

use serde::{Deserialize, Serialize};

/// Position in the source text
///
/// `offset` is a 0-based byte offset into the input; `line` and `column` are
/// 1-based, with columns counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Byte offset from the start of the input (0-indexed)
    pub offset: usize,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceInfo {
    /// Creates a position snapshot
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        SourceInfo {
            offset,
            line,
            column,
        }
    }

    /// Position reached after consuming `text` from this position
    pub fn advance(&self, text: &str) -> SourceInfo {
        let mut line = self.line;
        let mut column = self.column;
        for c in text.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        SourceInfo {
            offset: self.offset + text.len(),
            line,
            column,
        }
    }
}

impl Default for SourceInfo {
    fn default() -> Self {
        SourceInfo::new(0, 1, 1)
    }
}

impl fmt::Display for SourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (offset {})",
            self.line, self.column, self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_newlines() {
        let start = SourceInfo::default();
        let pos = start.advance("  (\n  ab");
        assert_eq!(pos, SourceInfo::new(8, 2, 5));
    }

    #[test]
    fn test_advance_counts_chars_not_bytes_for_columns() {
        let pos = SourceInfo::default().advance("λx");
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.column, 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            SourceInfo::new(6, 2, 6).to_string(),
            "line 2, column 6 (offset 6)"
        );
    }
}
