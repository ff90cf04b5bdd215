//! Property-based invariant tests for the cost rollup.
//!
//! Rosters are random trees: row 0 is the root and every later row reports
//! to some earlier one. Salaries are whole numbers so sums are exact.
//!
//! 1. Headcount: descendants of the root plus one is the employee count.
//! 2. Total cost is IC cost plus management cost, on every node.
//! 3. Leaves carry their own salary as IC cost and no management cost.
//! 4. Internal nodes carry at least the salaries of their managing reports,
//!    and exactly that when no report carries management cost of its own.
//! 5. Every salary except the root's is counted exactly once at the root.
//! 6. Processing is idempotent.
//! 7. Row order does not change any metric.

use orgcost::{process, OrgNode, OrgSummary};
use proptest::prelude::*;
use proptest::sample::Index;

// ── Helpers ─────────────────────────────────────────────────────────────

/// (manager row, salary) per row; row 0 has no manager.
type Roster = Vec<(Option<usize>, u32)>;

fn roster_strategy() -> impl Strategy<Value = Roster> {
    (1usize..60).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<Index>(), n),
            prop::collection::vec(0u32..200_000, n),
        )
            .prop_map(move |(parents, salaries)| {
                (0..n)
                    .map(|i| {
                        let manager = if i == 0 { None } else { Some(parents[i].index(i)) };
                        (manager, salaries[i])
                    })
                    .collect()
            })
    })
}

fn render(rows: &[(usize, Option<usize>, u32)]) -> String {
    let mut text = String::from("Employee Id,Manager,Salary\n");
    for (id, manager, salary) in rows {
        let manager = manager.map(|m| format!("E{m}")).unwrap_or_default();
        text.push_str(&format!("E{id},{manager},{salary}\n"));
    }
    text
}

fn numbered(roster: &Roster) -> Vec<(usize, Option<usize>, u32)> {
    roster
        .iter()
        .enumerate()
        .map(|(id, &(manager, salary))| (id, manager, salary))
        .collect()
}

fn summarize(roster: &Roster) -> OrgSummary {
    process(&render(&numbered(roster))).unwrap()
}

fn manager_salaries(node: &OrgNode) -> f64 {
    node.children
        .iter()
        .filter(|child| child.is_manager())
        .map(OrgNode::salary)
        .sum()
}

// ═════════════════════════════════════════════════════════════════════════
// 1-4. Per-node invariants
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn headcount_matches(roster in roster_strategy()) {
        let summary = summarize(&roster);
        prop_assert_eq!(summary.total_employees, roster.len());
        prop_assert_eq!(summary.root.metrics.descendant_count + 1, summary.total_employees);
        prop_assert_eq!(summary.root.iter().count(), roster.len());
    }

    #[test]
    fn node_invariants_hold(roster in roster_strategy()) {
        let summary = summarize(&roster);
        for node in summary.root.iter() {
            let m = node.metrics;
            prop_assert_eq!(m.total_cost, m.ic_cost + m.management_cost, "node {}", node.id());
            prop_assert_eq!(m.direct_count, node.children.len());
            prop_assert!(m.ic_cost >= 0.0 && m.management_cost >= 0.0);

            if node.is_leaf() {
                prop_assert_eq!(m.management_cost, 0.0);
                prop_assert_eq!(m.ic_cost, node.salary());
                prop_assert_eq!(m.descendant_count, 0);
            } else {
                prop_assert!(m.management_cost >= manager_salaries(node), "node {}", node.id());
                if node.children.iter().all(|c| c.metrics.management_cost == 0.0) {
                    prop_assert_eq!(m.management_cost, manager_salaries(node), "node {}", node.id());
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Conservation at the root
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn root_total_counts_each_salary_once(roster in roster_strategy()) {
        let summary = summarize(&roster);
        let expected: f64 = if roster.len() == 1 {
            f64::from(roster[0].1)
        } else {
            roster.iter().skip(1).map(|&(_, salary)| f64::from(salary)).sum()
        };
        prop_assert_eq!(summary.total_cost, expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6-7. Idempotence and order independence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn processing_is_idempotent(roster in roster_strategy()) {
        let text = render(&numbered(&roster));
        prop_assert_eq!(process(&text).unwrap(), process(&text).unwrap());
    }

    #[test]
    fn row_order_does_not_change_metrics(
        (original, shuffled) in roster_strategy().prop_flat_map(|roster| {
            let rows = numbered(&roster);
            (Just(rows.clone()), Just(rows).prop_shuffle())
        })
    ) {
        let a = process(&render(&original)).unwrap();
        let b = process(&render(&shuffled)).unwrap();

        prop_assert_eq!(a.total_cost, b.total_cost);
        for node in a.root.iter() {
            let other = b.find(node.id());
            prop_assert!(other.is_some(), "missing {}", node.id());
            if let Some(other) = other {
                prop_assert_eq!(node.metrics, other.metrics, "node {}", node.id());
            }
        }
    }
}
