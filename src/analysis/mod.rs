//! Derived display structures recomputed per render pass.
//!
//! Every function here is a pure, synchronous transformation of an
//! already-fetched span or trace collection; nothing is cached or mutated
//! in place. Malformed input (dangling parents, cycles, missing timestamps)
//! is policy-handled, never an error.

pub mod critical_path;
pub mod diff;
pub mod graph;
pub mod risk;
pub mod topology;
pub mod tree;

#[cfg(test)]
pub(crate) mod testutil;

pub use critical_path::{critical_path, critical_path_at, span_duration_ms, CriticalPath, PathSegment};
pub use diff::{state_diff, state_diffs, StateDiff};
pub use graph::{LayerAssignment, SpanDag};
pub use risk::{
    annotate_rows, error_rate_percent, escalation_rate_percent, format_ms, p95_ms,
    priority_queue, risk_score, trace_duration_ms, AnnotatedTrace, RiskBand,
};
pub use topology::{
    build_topology, graph_nodes, running_node_count, source_coverage, LayoutEdge, LayoutNode,
    LayoutParams, SourceCoverage, TopologyLayout,
};
pub use tree::{span_tree, TreeRow};
