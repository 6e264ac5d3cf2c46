//! Formatting helper functions for the CLI
//!
//! This module renders the Ga tree and a projected week as plain text.

use crate::ga::Node;
use crate::week::{DayEntry, weekday_name};

/// Format the tree below `root` as an indented outline
///
/// # Arguments
/// * `root` - Node whose children are listed (the node itself is the header)
///
/// # Returns
/// Formatted string, one node per line
pub fn format_tree(root: &Node) -> String {
    if root.children.is_empty() {
        return format!("{} (no sub-Ga)\n", root.name);
    }

    let mut result = format!("{} ({} node(s))\n", root.name, root.count() - 1);
    for child in &root.children {
        push_node(&mut result, child, 1);
    }
    result
}

fn push_node(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&format!("{}- {}\n", "  ".repeat(depth - 1), node.name));
    for child in &node.children {
        push_node(out, child, depth + 1);
    }
}

/// Format a projected week, one day per line
///
/// # Arguments
/// * `days` - Days as returned by the calendar projection
///
/// # Returns
/// Formatted string with date, weekday and text (or `-` when empty)
pub fn format_week(days: &[DayEntry]) -> String {
    let mut result = String::new();
    for day in days {
        let text = if day.text.is_empty() { "-" } else { &day.text };
        result.push_str(&format!(
            "{} {:<9} {}\n",
            day.date.format("%Y-%m-%d"),
            weekday_name(day.weekday),
            text
        ));
    }
    result
}
