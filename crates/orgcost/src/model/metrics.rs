//! Annotated org chart produced by [`crate::aggregate`].

use serde::Serialize;

use super::EmployeeRecord;

/// Cost rollup attached to every node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Number of immediate reports.
    pub direct_count: usize,
    /// Salaries of non-managing employees in the subtree.
    pub ic_cost: f64,
    /// Salaries of managing employees below this node, rolled up.
    pub management_cost: f64,
    /// `ic_cost + management_cost`.
    pub total_cost: f64,
    /// Subtree size, excluding the node itself.
    pub descendant_count: usize,
}

/// A node after rollup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgNode {
    #[serde(flatten)]
    pub record: EmployeeRecord,
    #[serde(flatten)]
    pub metrics: Metrics,
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn salary(&self) -> f64 {
        self.record.salary
    }

    /// A manager is anyone with at least one direct report.
    pub fn is_manager(&self) -> bool {
        self.metrics.direct_count > 0
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk of this subtree, parents before children, siblings in
    /// input order.
    pub fn iter(&self) -> OrgNodeIter<'_> {
        OrgNodeIter { stack: vec![self] }
    }

    /// Finds a node by employee id within this subtree.
    pub fn find(&self, id: &str) -> Option<&OrgNode> {
        self.iter().find(|node| node.id() == id)
    }
}

impl Drop for OrgNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Pre-order iterator over an [`OrgNode`] subtree.
pub struct OrgNodeIter<'a> {
    stack: Vec<&'a OrgNode>,
}

impl<'a> Iterator for OrgNodeIter<'a> {
    type Item = &'a OrgNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Whole-organization result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgSummary {
    pub root: OrgNode,
    pub total_employees: usize,
    pub total_cost: f64,
    pub management_cost: f64,
    pub ic_cost: f64,
}

impl OrgSummary {
    /// Fraction of total cost spent on management, `0.0` for a zero-cost org.
    pub fn management_share(&self) -> f64 {
        if self.total_cost > 0.0 {
            self.management_cost / self.total_cost
        } else {
            0.0
        }
    }

    /// Employees with at least one direct report.
    pub fn manager_count(&self) -> usize {
        self.root.iter().filter(|node| node.is_manager()).count()
    }

    pub fn find(&self, id: &str) -> Option<&OrgNode> {
        self.root.find(id)
    }
}
