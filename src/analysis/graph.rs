//! Span-graph layering.
//!
//! Builds a child-adjacency DAG over a span collection (edges only between
//! spans present in the collection, so a dangling `parent_span_id` makes the
//! span a root) and assigns each span its longest-path depth via queue-driven
//! relaxation. A span is only expanded once every in-set parent has been
//! processed, so its depth is final before its children are relaxed from it;
//! on malformed cyclic input the queue drains without visiting cycle members,
//! which terminates instead of looping.

use std::collections::{HashMap, VecDeque};

use crate::api::types::SpanNode;

/// Result of longest-path layer assignment over a span collection.
pub struct LayerAssignment {
    /// Depth per span, indexed like the input collection. Spans never
    /// reached by relaxation (cycle members) keep their partially relaxed
    /// value, defaulting to 0.
    pub depths: Vec<usize>,
    /// Input indices of spans stuck in a parent cycle.
    pub cycle_members: Vec<usize>,
}

impl LayerAssignment {
    pub fn has_cycle(&self) -> bool {
        !self.cycle_members.is_empty()
    }

    pub fn max_depth(&self) -> usize {
        self.depths.iter().copied().max().unwrap_or(0)
    }
}

/// Index-based DAG over a span collection, keyed by `parent_span_id`.
pub struct SpanDag {
    children: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
}

impl SpanDag {
    /// Build the restricted graph: a parent edge counts only when the parent
    /// is itself in `spans`. Everything else is a root (in-degree 0).
    pub fn from_spans(spans: &[SpanNode]) -> Self {
        let index_of: HashMap<&str, usize> = spans
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.as_str(), i))
            .collect();

        let mut children = vec![Vec::new(); spans.len()];
        let mut in_degree = vec![0usize; spans.len()];
        for (i, span) in spans.iter().enumerate() {
            if let Some(parent) = span.parent_span_id.as_deref() {
                if let Some(&p) = index_of.get(parent) {
                    children[p].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        Self { children, in_degree }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Longest-path depth per span.
    ///
    /// FIFO relaxation: roots enter at depth 0; dequeuing a span at depth `d`
    /// raises each child to `max(recorded, d + 1)` and enqueues the child once
    /// its last in-set parent has been processed.
    pub fn layer_assignment(&self) -> LayerAssignment {
        let mut depths = vec![0usize; self.len()];
        let mut remaining = self.in_degree.clone();

        let mut queue: VecDeque<usize> = remaining
            .iter()
            .enumerate()
            .filter(|(_, &deg)| deg == 0)
            .map(|(i, _)| i)
            .collect();

        while let Some(node) = queue.pop_front() {
            for &child in &self.children[node] {
                depths[child] = depths[child].max(depths[node] + 1);
                remaining[child] -= 1;
                if remaining[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        let cycle_members: Vec<usize> = (0..self.len())
            .filter(|&i| remaining[i] > 0)
            .collect();

        LayerAssignment { depths, cycle_members }
    }
}
