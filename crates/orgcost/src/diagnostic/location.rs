//! Source location tracking for roster rows.

use std::fmt;

/// Where a row sits in the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    /// 1-based data row index (the header is not counted).
    pub row: usize,
    /// 1-based physical line number, when the reader knows it.
    pub line: Option<u64>,
}

impl RowLocation {
    pub fn new(row: usize, line: Option<u64>) -> Self {
        Self { row, line }
    }
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "row {} (line {})", self.row, line),
            None => write!(f, "row {}", self.row),
        }
    }
}
