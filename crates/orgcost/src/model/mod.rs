//! Roster and org chart data model.
//!
//! Records come out of the parser, [`TreeNode`]s out of tree construction and
//! [`OrgNode`]s out of the rollup. Metrics only exist on the annotated side.

mod metrics;
mod record;
mod tree;

pub use metrics::{Metrics, OrgNode, OrgNodeIter, OrgSummary};
pub use record::EmployeeRecord;
pub use tree::{OrgTree, TreeNode};
