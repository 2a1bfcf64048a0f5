//! Per-node state transition diff.
//!
//! Compares the key set of a graph node's recorded `input_state` against its
//! `output_state`. Key order follows the source maps (output order for
//! added/kept, input order for removed); no extra sorting is imposed.

use serde::Serialize;
use ts_rs::TS;

use crate::api::types::SpanNode;

/// Key-set difference between a node's input and output state.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct StateDiff {
    pub id: String,
    pub name: String,
    /// Keys present in output but not input.
    pub added: Vec<String>,
    /// Keys present in input but not output.
    pub removed: Vec<String>,
    /// Keys present in both.
    pub kept: Vec<String>,
}

/// Build one diff row per node. Missing state maps default to empty.
pub fn state_diffs(nodes: &[SpanNode]) -> Vec<StateDiff> {
    nodes.iter().map(state_diff).collect()
}

pub fn state_diff(node: &SpanNode) -> StateDiff {
    let empty = serde_json::Map::new();
    let input = node.attributes.input_state.as_ref().unwrap_or(&empty);
    let output = node.attributes.output_state.as_ref().unwrap_or(&empty);

    let added = output
        .keys()
        .filter(|k| !input.contains_key(*k))
        .cloned()
        .collect();
    let removed = input
        .keys()
        .filter(|k| !output.contains_key(*k))
        .cloned()
        .collect();
    let kept = output
        .keys()
        .filter(|k| input.contains_key(*k))
        .cloned()
        .collect();

    StateDiff {
        id: node.id.clone(),
        name: node.display_name().to_string(),
        added,
        removed,
        kept,
    }
}
