//! Org chart layout for the `tree` command.

use orgcost::OrgNode;

/// One row of the rendered chart.
#[derive(Debug)]
pub struct ChartLine<'a> {
    /// Box-drawing connectors leading up to the node.
    pub prefix: String,
    pub node: &'a OrgNode,
    /// Descendants not shown because of the depth limit.
    pub hidden: usize,
}

/// Lays out `root` depth-first with tree connectors. Nodes deeper than
/// `max_depth` (root = 0) are folded into their ancestor's `hidden` count.
pub fn chart_lines(root: &OrgNode, max_depth: Option<usize>) -> Vec<ChartLine<'_>> {
    let mut lines = Vec::new();
    // (node, depth, indent carried from ancestors, connector for this node)
    let mut stack: Vec<(&OrgNode, usize, String, &str)> = vec![(root, 0, String::new(), "")];

    while let Some((node, depth, indent, connector)) = stack.pop() {
        let at_limit = max_depth.is_some_and(|limit| depth >= limit);
        let hidden = if at_limit { node.metrics.descendant_count } else { 0 };

        lines.push(ChartLine {
            prefix: format!("{}{}", indent, connector),
            node,
            hidden,
        });

        if at_limit {
            continue;
        }

        let child_indent = match connector {
            "" => indent.clone(),
            "\u{2570}\u{2500}\u{2500} " => format!("{}    ", indent),
            _ => format!("{}\u{2502}   ", indent),
        };
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate().rev() {
            let connector = if i == last {
                "\u{2570}\u{2500}\u{2500} " // ╰──
            } else {
                "\u{251C}\u{2500}\u{2500} " // ├──
            };
            stack.push((child, depth + 1, child_indent.clone(), connector));
        }
    }

    lines
}
