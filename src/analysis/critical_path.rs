//! Critical path: the root-to-leaf chain of spans with the largest
//! cumulative duration, over the full span forest (all span types).

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::api::types::SpanNode;

/// One hop on the critical path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PathSegment {
    pub id: String,
    pub name: String,
    pub span_type: String,
    #[ts(type = "number")]
    pub duration_ms: u64,
}

/// The winning path and its cumulative duration.
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export)]
pub struct CriticalPath {
    #[ts(type = "number")]
    pub total_ms: u64,
    pub path: Vec<PathSegment>,
}

/// Span duration in milliseconds, clamped at 0. A missing end time means the
/// span is still running and contributes its elapsed-so-far duration against
/// `now`; a missing start time contributes nothing.
pub fn span_duration_ms(span: &SpanNode, now: DateTime<Utc>) -> u64 {
    let Some(start) = span.start_time else {
        return 0;
    };
    let end = span.end_time.unwrap_or(now);
    (end - start).num_milliseconds().max(0) as u64
}

/// Convenience wrapper evaluating in-flight spans against the current time.
pub fn critical_path(spans: &[SpanNode]) -> CriticalPath {
    critical_path_at(spans, Utc::now())
}

/// Depth-first search from every root, accumulating durations; a leaf total
/// replaces the best only when strictly greater, so ties keep the first path
/// found in input order. Cyclic parent references stop descending at the
/// first revisited span.
pub fn critical_path_at(spans: &[SpanNode], now: DateTime<Utc>) -> CriticalPath {
    let ids: HashSet<&str> = spans.iter().map(|s| s.id.as_str()).collect();

    let mut children: HashMap<&str, Vec<&SpanNode>> = HashMap::new();
    let mut roots: Vec<&SpanNode> = Vec::new();
    for span in spans {
        match span.parent_span_id.as_deref().filter(|p| ids.contains(p)) {
            Some(parent) => children.entry(parent).or_default().push(span),
            None => roots.push(span),
        }
    }

    let mut best = CriticalPath::default();
    let mut stack: Vec<PathSegment> = Vec::new();
    let mut on_path: HashSet<&str> = HashSet::new();
    for root in roots {
        descend(root, 0, &children, &mut stack, &mut on_path, &mut best, now);
    }
    best
}

fn descend<'a>(
    span: &'a SpanNode,
    acc: u64,
    children: &HashMap<&str, Vec<&'a SpanNode>>,
    stack: &mut Vec<PathSegment>,
    on_path: &mut HashSet<&'a str>,
    best: &mut CriticalPath,
    now: DateTime<Utc>,
) {
    if !on_path.insert(span.id.as_str()) {
        return;
    }

    let duration_ms = span_duration_ms(span, now);
    let total = acc + duration_ms;
    stack.push(PathSegment {
        id: span.id.clone(),
        name: span.name.clone(),
        span_type: span.span_type.clone(),
        duration_ms,
    });

    let kids = children.get(span.id.as_str()).map(Vec::as_slice).unwrap_or(&[]);
    if kids.is_empty() && total > best.total_ms {
        best.total_ms = total;
        best.path = stack.clone();
    }
    for &child in kids {
        descend(child, total, children, stack, on_path, best, now);
    }

    stack.pop();
    on_path.remove(span.id.as_str());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testutil::{at_ms, span, timed_span};

    #[test]
    fn empty_input_yields_zero_path() {
        let cp = critical_path_at(&[], at_ms(0));
        assert_eq!(cp.total_ms, 0);
        assert!(cp.path.is_empty());
    }

    #[test]
    fn single_root_without_children() {
        let spans = vec![timed_span("a", None, 0, Some(100))];
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 100);
        assert_eq!(cp.path.len(), 1);
        assert_eq!(cp.path[0].id, "a");
        assert_eq!(cp.path[0].duration_ms, 100);
    }

    #[test]
    fn two_level_chain_sums_both_spans() {
        let spans = vec![
            timed_span("a", None, 0, Some(100)),
            timed_span("b", Some("a"), 100, Some(300)),
        ];
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 300);
        let ids: Vec<&str> = cp.path.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn picks_the_slower_branch() {
        let spans = vec![
            timed_span("root", None, 0, Some(50)),
            timed_span("fast", Some("root"), 50, Some(100)),
            timed_span("slow", Some("root"), 50, Some(400)),
        ];
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 400);
        assert_eq!(cp.path.last().unwrap().id, "slow");
    }

    #[test]
    fn tie_keeps_first_found_in_input_order() {
        let spans = vec![
            timed_span("root", None, 0, Some(10)),
            timed_span("left", Some("root"), 10, Some(110)),
            timed_span("right", Some("root"), 10, Some(110)),
        ];
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 110);
        assert_eq!(cp.path.last().unwrap().id, "left");
    }

    #[test]
    fn running_span_contributes_elapsed_so_far() {
        let spans = vec![timed_span("open", None, 100, None)];
        let cp = critical_path_at(&spans, at_ms(600));
        assert_eq!(cp.total_ms, 500);
    }

    #[test]
    fn missing_start_contributes_zero() {
        let spans = vec![span("no-times", None)];
        let cp = critical_path_at(&spans, at_ms(1_000));
        // A zero-duration leaf never beats the zero default; path stays empty.
        assert_eq!(cp.total_ms, 0);
        assert!(cp.path.is_empty());
    }

    #[test]
    fn end_before_start_clamps_to_zero() {
        let spans = vec![timed_span("skewed", None, 500, Some(100))];
        assert_eq!(span_duration_ms(&spans[0], at_ms(1_000)), 0);
    }

    #[test]
    fn dangling_parent_becomes_its_own_root() {
        let spans = vec![
            timed_span("a", None, 0, Some(50)),
            timed_span("x", Some("missing"), 0, Some(200)),
        ];
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 200);
        assert_eq!(cp.path[0].id, "x");
    }

    #[test]
    fn parent_cycle_terminates() {
        let spans = vec![
            timed_span("a", Some("b"), 0, Some(100)),
            timed_span("b", Some("a"), 0, Some(100)),
        ];
        // Both spans have in-set parents, so there are no roots; the search
        // visits nothing and must simply return the empty default.
        let cp = critical_path_at(&spans, at_ms(1_000));
        assert_eq!(cp.total_ms, 0);
    }

    #[test]
    fn deterministic_across_invocations() {
        let spans = vec![
            timed_span("root", None, 0, Some(30)),
            timed_span("b", Some("root"), 30, Some(90)),
            timed_span("c", Some("b"), 90, Some(250)),
        ];
        let now = at_ms(10_000);
        let first = critical_path_at(&spans, now);
        let second = critical_path_at(&spans, now);
        assert_eq!(first.total_ms, second.total_ms);
        assert_eq!(first.path, second.path);
    }
}
