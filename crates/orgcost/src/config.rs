//! Engine configuration.

use std::fmt;
use std::str::FromStr;

/// Column names the engine interprets. Every other column is passthrough.
pub mod columns {
    pub const EMPLOYEE_ID: &str = "Employee Id";
    pub const MANAGER: &str = "Manager";
    pub const SALARY: &str = "Salary";
}

/// Delimiters tried, in priority order, when auto-detecting.
const CANDIDATE_DELIMITERS: &[u8] = b",\t;|";

/// Field delimiter used when reading a roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// Guess from the header line, falling back to a comma.
    #[default]
    Auto,
    /// Always use this byte.
    Char(u8),
}

impl Delimiter {
    /// Resolves to a concrete delimiter byte for `text`.
    pub fn resolve(self, text: &str) -> u8 {
        match self {
            Delimiter::Char(b) => b,
            Delimiter::Auto => detect_delimiter(text),
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Delimiter::Auto),
            "tab" | "\\t" | "\t" => Ok(Delimiter::Char(b'\t')),
            "comma" => Ok(Delimiter::Char(b',')),
            "semicolon" => Ok(Delimiter::Char(b';')),
            "pipe" => Ok(Delimiter::Char(b'|')),
            other if other.len() == 1 && other.is_ascii() => Ok(Delimiter::Char(other.as_bytes()[0])),
            other => Err(format!(
                "invalid delimiter '{}': expected auto, tab, or a single ASCII character",
                other
            )),
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Auto => write!(f, "auto"),
            Delimiter::Char(b'\t') => write!(f, "tab"),
            Delimiter::Char(b) => write!(f, "{}", *b as char),
        }
    }
}

/// Picks the candidate delimiter that occurs most often in the first
/// non-blank line. Ties go to the earlier candidate.
fn detect_delimiter(text: &str) -> u8 {
    let header = text
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    let mut best = (b',', 0usize);
    for &candidate in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Configuration for the org cost engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Field delimiter (default: auto-detect).
    pub delimiter: Delimiter,
}

impl EngineConfig {
    pub fn with_delimiter(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }
}
