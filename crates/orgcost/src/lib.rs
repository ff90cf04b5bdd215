//! # orgcost
//!
//! Turns an employee roster (delimited text naming each employee, their
//! manager and salary) into an org tree annotated with bottom-up cost
//! rollups.
//!
//! ## Architecture
//!
//! ```text
//! Roster text
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Parse     │  Trim, coerce salary, collect row issues
//! │ (text → rows)│
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Build     │  Duplicate ids, root count, dangling refs, cycles
//! │ (rows → tree)│
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │  Aggregate   │  Post-order IC / management / total cost, headcount
//! │(tree → sum.) │
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use orgcost::{EngineConfig, OrgEngine};
//!
//! let engine = OrgEngine::new(EngineConfig::default());
//! let summary = engine
//!     .process("Employee Id,Manager,Salary\nE1,,100\nE2,E1,50\n")
//!     .unwrap();
//!
//! assert_eq!(summary.total_employees, 2);
//! assert_eq!(summary.management_cost, 0.0);
//! assert_eq!(summary.ic_cost, 50.0);
//! assert_eq!(summary.total_cost, 50.0);
//! ```

pub mod config;
pub mod diagnostic;
pub mod model;
pub mod parse;
pub mod tree;

use std::path::Path;

use tracing::debug;

pub use config::{columns, Delimiter, EngineConfig};
pub use diagnostic::{OrgError, ParseIssue, ParseIssueKind, RowLocation, TreeShapeError};
pub use model::{EmployeeRecord, Metrics, OrgNode, OrgSummary, OrgTree, TreeNode};
pub use parse::{parse, parse_rows, ParseOutcome};
pub use tree::{aggregate, build};

/// Runs the parse → build → aggregate pipeline.
///
/// Holds configuration only; every call builds and returns its own tree.
#[derive(Debug, Clone, Default)]
pub struct OrgEngine {
    config: EngineConfig,
}

impl OrgEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processes roster text into a fully annotated summary.
    pub fn process(&self, text: &str) -> Result<OrgSummary, OrgError> {
        let tree = self.check(text)?;
        Ok(aggregate(tree))
    }

    /// Parses and validates roster text without computing costs.
    pub fn check(&self, text: &str) -> Result<OrgTree, OrgError> {
        let records = parse(text, &self.config)?;
        Ok(build(records)?)
    }

    /// Reads a roster file and processes it.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<OrgSummary, OrgError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| OrgError::io(path, e.to_string()))?;
        debug!(path = %path.display(), bytes = text.len(), "read roster file");
        self.process(&text)
    }
}

/// Processes roster text with the default configuration.
pub fn process(text: &str) -> Result<OrgSummary, OrgError> {
    OrgEngine::default().process(text)
}
