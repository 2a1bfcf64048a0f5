//! Layered DAG layout for the graph-node view.
//!
//! Positions the `langgraph_node` spans of a trace in columns by longest-path
//! depth and rows by input order, and emits the parent→child connector lines
//! the SVG renderer draws between boxes.

use std::collections::HashMap;

use serde::Serialize;
use ts_rs::TS;

use crate::analysis::graph::SpanDag;
use crate::api::types::SpanNode;

/// Pixel geometry for the layout. Defaults match the dashboard renderer.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    pub box_w: u32,
    pub box_h: u32,
    pub x_gap: u32,
    pub y_gap: u32,
    pub margin: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            box_w: 190,
            box_h: 76,
            x_gap: 80,
            y_gap: 44,
            margin: 24,
        }
    }
}

/// A span placed on the canvas.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct LayoutNode {
    pub span: SpanNode,
    /// Longest-path distance from a depth-0 root within the eligible subset.
    #[ts(type = "number")]
    pub depth: usize,
    pub x: u32,
    pub y: u32,
}

/// Connector from a parent box's right-center to a child box's left-center.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct LayoutEdge {
    pub from_x: u32,
    pub from_y: u32,
    pub to_x: u32,
    pub to_y: u32,
}

/// Complete layout handed to the SVG renderer.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct TopologyLayout {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: u32,
    pub height: u32,
    pub box_w: u32,
    pub box_h: u32,
}

impl TopologyLayout {
    fn empty(params: &LayoutParams) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            width: 0,
            height: 0,
            box_w: params.box_w,
            box_h: params.box_h,
        }
    }
}

/// The subset of spans eligible for topology and diff analysis.
pub fn graph_nodes(spans: &[SpanNode]) -> Vec<SpanNode> {
    spans.iter().filter(|s| s.is_graph_node()).cloned().collect()
}

/// Lay out the eligible node subset. Column = depth, row = relative input
/// order within the column. Empty input produces a zero-sized canvas.
pub fn build_topology(nodes: &[SpanNode], params: &LayoutParams) -> TopologyLayout {
    if nodes.is_empty() {
        return TopologyLayout::empty(params);
    }

    let layers = SpanDag::from_spans(nodes).layer_assignment();

    // Row index per node: position among same-depth nodes in input order.
    let mut rows_per_depth: HashMap<usize, u32> = HashMap::new();
    let mut positioned = Vec::with_capacity(nodes.len());
    for (i, node) in nodes.iter().enumerate() {
        let depth = layers.depths[i];
        let row = rows_per_depth.entry(depth).or_insert(0);
        let x = params.margin + depth as u32 * (params.box_w + params.x_gap);
        let y = params.margin + *row * (params.box_h + params.y_gap);
        *row += 1;
        positioned.push(LayoutNode {
            span: node.clone(),
            depth,
            x,
            y,
        });
    }

    let position_of: HashMap<&str, (u32, u32)> = positioned
        .iter()
        .map(|n| (n.span.id.as_str(), (n.x, n.y)))
        .collect();

    let mut edges = Vec::new();
    for node in &positioned {
        let Some(parent) = node.span.parent_span_id.as_deref() else {
            continue;
        };
        if let Some(&(px, py)) = position_of.get(parent) {
            edges.push(LayoutEdge {
                from_x: px + params.box_w,
                from_y: py + params.box_h / 2,
                to_x: node.x,
                to_y: node.y + params.box_h / 2,
            });
        }
    }

    let max_depth = layers.max_depth() as u32;
    let max_rows = rows_per_depth.values().copied().max().unwrap_or(0).max(1);
    let width = 2 * params.margin + (max_depth + 1) * params.box_w + max_depth * params.x_gap;
    let height = 2 * params.margin + max_rows * params.box_h + (max_rows - 1) * params.y_gap;

    TopologyLayout {
        nodes: positioned,
        edges,
        width,
        height,
        box_w: params.box_w,
        box_h: params.box_h,
    }
}

/// How many eligible nodes carry a source mapping, out of the total.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SourceCoverage {
    #[ts(type = "number")]
    pub mapped: usize,
    #[ts(type = "number")]
    pub total: usize,
    /// Rounded percentage; 0 when there are no nodes.
    pub percent: u32,
}

pub fn source_coverage(nodes: &[SpanNode]) -> SourceCoverage {
    let total = nodes.len();
    let mapped = nodes.iter().filter(|n| n.source_ref().is_some()).count();
    let percent = ((mapped as f64 / total.max(1) as f64) * 100.0).round() as u32;
    SourceCoverage { mapped, total, percent }
}

/// Nodes still in flight: no end time, or explicitly reported as running.
pub fn running_node_count(nodes: &[SpanNode]) -> usize {
    nodes
        .iter()
        .filter(|n| n.end_time.is_none() || n.status == "running")
        .count()
}
