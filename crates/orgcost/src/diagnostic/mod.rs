//! Diagnostic types for error reporting.

mod error;
mod location;

pub use error::{OrgError, ParseIssue, ParseIssueKind, TreeShapeError};
pub use location::RowLocation;
