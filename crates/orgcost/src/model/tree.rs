//! Structural tree produced by [`crate::build`].

use super::EmployeeRecord;

/// A node before rollup: a record and its direct reports in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub record: EmployeeRecord,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn leaf(record: EmployeeRecord) -> Self {
        Self {
            record,
            children: Vec::new(),
        }
    }
}

// Deep reporting chains would otherwise overflow the stack in drop glue.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// A validated, single-rooted org tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OrgTree {
    pub(crate) root: TreeNode,
    pub(crate) len: usize,
}

impl OrgTree {
    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    /// Number of employees in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
