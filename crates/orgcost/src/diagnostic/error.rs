//! Engine error types.
#![allow(unused_assignments)]

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::RowLocation;

/// Errors that can occur while turning roster text into an [`crate::OrgSummary`].
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum OrgError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read roster '{}': {message}", path.display())]
    #[diagnostic(code(orgcost::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Roster header is missing the '{column}' column")]
    #[diagnostic(
        code(orgcost::parse::missing_column),
        help("Found columns: {found}. Column names are case-sensitive.")
    )]
    MissingColumn {
        column: String,
        found: String,
    },

    #[error("Malformed roster: {} row issue(s)\n{}", .issues.len(), render_issues(.issues))]
    #[diagnostic(
        code(orgcost::parse::malformed_input),
        help("Every row must have the same number of fields as the header and a non-empty 'Employee Id'.")
    )]
    MalformedInput {
        issues: Vec<ParseIssue>,
    },

    // =========================================================================
    // Tree Shape Errors
    // =========================================================================
    #[error(transparent)]
    #[diagnostic(transparent)]
    TreeShape(#[from] TreeShapeError),
}

impl OrgError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Violations of the single-rooted tree shape, raised by [`crate::build`].
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum TreeShapeError {
    #[error("Duplicate employee id '{id}' (records #{first} and #{second})")]
    #[diagnostic(code(orgcost::tree::duplicate_id))]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("No root employee: every record names a manager")]
    #[diagnostic(
        code(orgcost::tree::missing_root),
        help("Exactly one employee must leave the 'Manager' column empty.")
    )]
    MissingRoot,

    #[error("Multiple root employees: {}", .ids.join(", "))]
    #[diagnostic(
        code(orgcost::tree::multiple_roots),
        help("Exactly one employee must leave the 'Manager' column empty.")
    )]
    MultipleRoots {
        ids: Vec<String>,
    },

    #[error("Employee '{id}' reports to unknown manager '{manager_id}'")]
    #[diagnostic(code(orgcost::tree::dangling_reference))]
    DanglingReference {
        id: String,
        manager_id: String,
    },

    #[error("Reporting cycle detected: {}", .cycle.join(" -> "))]
    #[diagnostic(
        code(orgcost::tree::cycle_detected),
        help("Break the cycle so every manager chain ends at the root.")
    )]
    CycleDetected {
        cycle: Vec<String>,
    },
}

/// A single structural problem found while reading a roster row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseIssue {
    pub location: RowLocation,
    pub kind: ParseIssueKind,
}

/// What went wrong with a row.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseIssueKind {
    /// The row has a different number of fields than the header.
    FieldCount { expected: usize, found: usize },
    /// The identifier column is empty.
    MissingId,
    /// The reader could not decode the row at all.
    Unreadable { message: String },
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.location)?;
        match &self.kind {
            ParseIssueKind::FieldCount { expected, found } => {
                write!(f, "expected {} fields, found {}", expected, found)
            }
            ParseIssueKind::MissingId => write!(f, "missing employee id"),
            ParseIssueKind::Unreadable { message } => write!(f, "{}", message),
        }
    }
}

fn render_issues(issues: &[ParseIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  {}", issue))
        .collect::<Vec<_>>()
        .join("\n")
}
