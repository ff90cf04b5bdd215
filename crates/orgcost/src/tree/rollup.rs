//! Bottom-up cost rollup.

use tracing::debug;

use crate::model::{EmployeeRecord, Metrics, OrgNode, OrgSummary, OrgTree, TreeNode};

/// Annotates every node of `tree` and summarizes the root.
///
/// One post-order pass: a node is finished only after all of its children.
/// Cannot fail on a tree produced by [`crate::build`].
pub fn aggregate(tree: OrgTree) -> OrgSummary {
    let total_employees = tree.len;
    let root = rollup(tree.root);

    debug!(
        total_employees,
        total_cost = root.metrics.total_cost,
        management_cost = root.metrics.management_cost,
        ic_cost = root.metrics.ic_cost,
        "aggregated org costs"
    );

    OrgSummary {
        total_employees,
        total_cost: root.metrics.total_cost,
        management_cost: root.metrics.management_cost,
        ic_cost: root.metrics.ic_cost,
        root,
    }
}

/// Metrics for a node with `salary` whose children are already rolled up.
///
/// A child counts as a manager when it has reports of its own; its salary
/// lands in this node's management cost, never in IC cost.
pub fn rollup_metrics(salary: f64, children: &[OrgNode]) -> Metrics {
    if children.is_empty() {
        return Metrics {
            direct_count: 0,
            ic_cost: salary,
            management_cost: 0.0,
            total_cost: salary,
            descendant_count: 0,
        };
    }

    let ic_cost: f64 = children.iter().map(|child| child.metrics.ic_cost).sum();
    let management_cost: f64 = children
        .iter()
        .map(|child| {
            let own = if child.is_manager() { child.salary() } else { 0.0 };
            own + child.metrics.management_cost
        })
        .sum();
    let descendant_count = children
        .iter()
        .map(|child| child.metrics.descendant_count + 1)
        .sum();

    Metrics {
        direct_count: children.len(),
        ic_cost,
        management_cost,
        total_cost: ic_cost + management_cost,
        descendant_count,
    }
}

/// A node whose children are still being rolled up.
struct Frame {
    record: EmployeeRecord,
    pending: std::vec::IntoIter<TreeNode>,
    done: Vec<OrgNode>,
}

impl Frame {
    fn new(mut node: TreeNode) -> Self {
        let record = std::mem::take(&mut node.record);
        let children = std::mem::take(&mut node.children);
        Self {
            record,
            done: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
        }
    }

    fn finish(self) -> OrgNode {
        let metrics = rollup_metrics(self.record.salary, &self.done);
        OrgNode {
            record: self.record,
            metrics,
            children: self.done,
        }
    }
}

/// Explicit-stack post-order traversal, so depth is bounded by the heap.
fn rollup(root: TreeNode) -> OrgNode {
    let mut ancestors: Vec<Frame> = Vec::new();
    let mut current = Frame::new(root);

    loop {
        match current.pending.next() {
            Some(child) => {
                ancestors.push(current);
                current = Frame::new(child);
            }
            None => {
                let finished = current.finish();
                match ancestors.pop() {
                    Some(parent) => {
                        current = parent;
                        current.done.push(finished);
                    }
                    None => return finished,
                }
            }
        }
    }
}
