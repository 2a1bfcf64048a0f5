//! Shared fixtures for the analysis unit tests.

use chrono::{DateTime, Utc};

use crate::api::types::{
    SourceRef, SpanAttributes, SpanMetadata, SpanNode, TraceSummary, GRAPH_NODE_SPAN_TYPE,
};

/// Instant `ms` milliseconds after the Unix epoch.
pub fn at_ms(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).expect("valid test timestamp")
}

/// Minimal span with no timing, outside the graph-node subset.
pub fn span(id: &str, parent: Option<&str>) -> SpanNode {
    SpanNode {
        id: id.to_string(),
        parent_span_id: parent.map(str::to_string),
        name: id.to_string(),
        span_type: "agent_step".to_string(),
        status: "success".to_string(),
        start_time: None,
        end_time: None,
        error: None,
        attributes: SpanAttributes::default(),
    }
}

/// Span with start/end at the given epoch offsets (end `None` = running).
pub fn timed_span(id: &str, parent: Option<&str>, start_ms: i64, end_ms: Option<i64>) -> SpanNode {
    let mut s = span(id, parent);
    s.start_time = Some(at_ms(start_ms));
    s.end_time = end_ms.map(at_ms);
    s
}

/// Span in the topology-eligible subset.
pub fn graph_span(id: &str, parent: Option<&str>) -> SpanNode {
    let mut s = span(id, parent);
    s.span_type = GRAPH_NODE_SPAN_TYPE.to_string();
    s
}

/// Attach input/output state maps, preserving the given key order.
pub fn with_states(mut s: SpanNode, input: &[(&str, i64)], output: &[(&str, i64)]) -> SpanNode {
    let to_map = |pairs: &[(&str, i64)]| {
        let mut map = serde_json::Map::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), serde_json::json!(v));
        }
        map
    };
    s.attributes.input_state = Some(to_map(input));
    s.attributes.output_state = Some(to_map(output));
    s
}

/// Attach a source mapping under `attributes.metadata.source_ref`.
pub fn with_source_ref(mut s: SpanNode, file: &str, line: u64) -> SpanNode {
    s.attributes.metadata = Some(SpanMetadata {
        source_ref: Some(SourceRef {
            file: Some(file.to_string()),
            line: Some(line),
            function: None,
        }),
        extra: Default::default(),
    });
    s
}

/// Minimal trace summary row for risk-score tests.
pub fn trace_row(id: &str, status: &str, completion_rate: f64) -> TraceSummary {
    TraceSummary {
        id: id.to_string(),
        status: status.to_string(),
        start_time: None,
        end_time: None,
        model: None,
        environment: None,
        user_id: None,
        session_id: None,
        completion_rate,
        has_open_spans: false,
        user_review_passed: None,
        decision: None,
    }
}
