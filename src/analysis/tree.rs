//! Depth-annotated span ordering for the indented tree view.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use ts_rs::TS;

use crate::api::types::SpanNode;

/// One row of the indented display: a span and its nesting depth.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct TreeRow {
    pub span: SpanNode,
    #[ts(type = "number")]
    pub depth: usize,
}

/// Depth-first traversal of the span forest in display order.
///
/// Roots are spans with no parent or a parent id that does not resolve in the
/// collection; sibling order follows input order. Each span appears exactly
/// once — its position is determined by its own `parent_span_id` — and a
/// visited set stops descent on malformed cyclic input.
pub fn span_tree(spans: &[SpanNode]) -> Vec<TreeRow> {
    let ids: HashSet<&str> = spans.iter().map(|s| s.id.as_str()).collect();

    let mut children: HashMap<&str, Vec<&SpanNode>> = HashMap::new();
    let mut roots: Vec<&SpanNode> = Vec::new();
    for span in spans {
        match span.parent_span_id.as_deref().filter(|p| ids.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(span),
            None => roots.push(span),
        }
    }

    let mut rows = Vec::with_capacity(spans.len());
    let mut visited: HashSet<&str> = HashSet::new();
    for root in roots {
        walk(root, 0, &children, &mut visited, &mut rows);
    }
    rows
}

fn walk<'a>(
    span: &'a SpanNode,
    depth: usize,
    children: &HashMap<&str, Vec<&'a SpanNode>>,
    visited: &mut HashSet<&'a str>,
    rows: &mut Vec<TreeRow>,
) {
    if !visited.insert(span.id.as_str()) {
        return;
    }
    rows.push(TreeRow {
        span: span.clone(),
        depth,
    });
    if let Some(kids) = children.get(span.id.as_str()) {
        for &child in kids {
            walk(child, depth + 1, children, visited, rows);
        }
    }
}
