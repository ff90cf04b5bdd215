//! Tree shape validation and construction.

use std::collections::HashMap;

use tracing::debug;

use crate::diagnostic::TreeShapeError;
use crate::model::{EmployeeRecord, OrgTree, TreeNode};

/// Links records into a single-rooted tree.
///
/// Checks, in order: duplicate ids, root count, dangling manager references,
/// and finally reachability from the root. Anything unreachable sits on or
/// under a reporting cycle.
pub fn build(records: Vec<EmployeeRecord>) -> Result<OrgTree, TreeShapeError> {
    let len = records.len();

    let mut index: HashMap<&str, usize> = HashMap::with_capacity(len);
    for (position, record) in records.iter().enumerate() {
        if let Some(&first) = index.get(record.id.as_str()) {
            return Err(TreeShapeError::DuplicateId {
                id: record.id.clone(),
                first: first + 1,
                second: position + 1,
            });
        }
        index.insert(record.id.as_str(), position);
    }

    let roots: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.is_root())
        .map(|(position, _)| position)
        .collect();
    let root = match roots.as_slice() {
        [] => return Err(TreeShapeError::MissingRoot),
        [only] => *only,
        many => {
            return Err(TreeShapeError::MultipleRoots {
                ids: many.iter().map(|&p| records[p].id.clone()).collect(),
            })
        }
    };

    let mut parent: Vec<Option<usize>> = vec![None; len];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
    for (position, record) in records.iter().enumerate() {
        let Some(manager_id) = record.manager_id.as_deref() else {
            continue;
        };
        let &manager = index
            .get(manager_id)
            .ok_or_else(|| TreeShapeError::DanglingReference {
                id: record.id.clone(),
                manager_id: manager_id.to_string(),
            })?;
        parent[position] = Some(manager);
        children[manager].push(position);
    }
    drop(index);

    let order = preorder(root, &children);
    if order.len() != len {
        let mut reached = vec![false; len];
        for &position in &order {
            reached[position] = true;
        }
        let start = reached.iter().position(|r| !r).unwrap_or(root);
        return Err(TreeShapeError::CycleDetected {
            cycle: trace_cycle(start, &parent, &records),
        });
    }

    debug!(employees = len, root = %records[root].id, "built org tree");

    // Reverse pre-order visits every child before its parent.
    let mut pending: Vec<Option<EmployeeRecord>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<TreeNode>> = (0..len).map(|_| None).collect();
    for &position in order.iter().rev() {
        let kids: Vec<TreeNode> = children[position]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        if let Some(record) = pending[position].take() {
            built[position] = Some(TreeNode {
                record,
                children: kids,
            });
        }
    }

    let root = built[root].take().ok_or(TreeShapeError::MissingRoot)?;
    Ok(OrgTree { root, len })
}

/// Positions reachable from `root`, parents first, siblings in input order.
fn preorder(root: usize, children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack = vec![root];
    while let Some(position) = stack.pop() {
        order.push(position);
        stack.extend(children[position].iter().rev());
    }
    order
}

/// Follows manager links from `start` until one repeats and returns the loop,
/// closed with its first id. `start` must not reach the root.
fn trace_cycle(start: usize, parent: &[Option<usize>], records: &[EmployeeRecord]) -> Vec<String> {
    let mut path: Vec<usize> = Vec::new();
    let mut seen: HashMap<usize, usize> = HashMap::new();
    let mut current = Some(start);

    while let Some(position) = current {
        if let Some(&loop_start) = seen.get(&position) {
            let mut cycle: Vec<String> = path[loop_start..]
                .iter()
                .map(|&p| records[p].id.clone())
                .collect();
            cycle.push(records[position].id.clone());
            return cycle;
        }
        seen.insert(position, path.len());
        path.push(position);
        current = parent[position];
    }

    // Only reachable if the chain ended at a root, which `start` cannot do.
    path.iter().map(|&p| records[p].id.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, manager: Option<&str>) -> EmployeeRecord {
        EmployeeRecord::new(id, manager, 1.0)
    }

    fn ids(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|c| c.record.id.as_str()).collect()
    }

    #[test]
    fn test_builds_tree_in_input_order() {
        let tree = build(vec![
            rec("E3", Some("E1")),
            rec("E1", None),
            rec("E4", Some("E3")),
            rec("E2", Some("E1")),
        ])
        .unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().record.id, "E1");
        assert_eq!(ids(tree.root()), ["E3", "E2"]);
        assert_eq!(ids(&tree.root().children[0]), ["E4"]);
    }

    #[test]
    fn test_duplicate_id() {
        let err = build(vec![rec("E1", None), rec("E2", Some("E1")), rec("E2", Some("E1"))]).unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::DuplicateId {
                id: "E2".into(),
                first: 2,
                second: 3
            }
        );
    }

    #[test]
    fn test_missing_root() {
        assert_eq!(build(vec![]).unwrap_err(), TreeShapeError::MissingRoot);
        let err = build(vec![rec("A", Some("B")), rec("B", Some("A"))]).unwrap_err();
        assert_eq!(err, TreeShapeError::MissingRoot);
    }

    #[test]
    fn test_multiple_roots() {
        let err = build(vec![rec("E1", None), rec("E2", None)]).unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::MultipleRoots {
                ids: vec!["E1".into(), "E2".into()]
            }
        );
    }

    #[test]
    fn test_dangling_reference() {
        let err = build(vec![rec("E1", None), rec("E2", Some("E9"))]).unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::DanglingReference {
                id: "E2".into(),
                manager_id: "E9".into()
            }
        );
    }

    #[test]
    fn test_cycle_detected() {
        let err = build(vec![
            rec("E1", None),
            rec("E2", Some("E1")),
            rec("A", Some("B")),
            rec("B", Some("C")),
            rec("C", Some("A")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::CycleDetected {
                cycle: vec!["A".into(), "B".into(), "C".into(), "A".into()]
            }
        );
    }

    #[test]
    fn test_cycle_reported_from_hanging_branch() {
        // X hangs off the A <-> B loop without being part of it.
        let err = build(vec![
            rec("R", None),
            rec("X", Some("A")),
            rec("A", Some("B")),
            rec("B", Some("A")),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::CycleDetected {
                cycle: vec!["A".into(), "B".into(), "A".into()]
            }
        );
    }

    #[test]
    fn test_self_manager_is_a_cycle() {
        let err = build(vec![rec("R", None), rec("S", Some("S"))]).unwrap_err();
        assert_eq!(
            err,
            TreeShapeError::CycleDetected {
                cycle: vec!["S".into(), "S".into()]
            }
        );
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut records = vec![rec("0", None)];
        for i in 1..100_000 {
            records.push(EmployeeRecord::new(i.to_string(), Some(&(i - 1).to_string()), 1.0));
        }
        let tree = build(records).unwrap();
        assert_eq!(tree.len(), 100_000);
    }
}
