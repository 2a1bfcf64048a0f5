//! Wire types for the Trace Hub backend REST surface.
//!
//! The backend owns this schema; these types mirror it with explicit
//! optionality so absent fields deserialize instead of failing. Unknown
//! attribute keys are retained in `extra` rather than dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Span type tag identifying spans eligible for topology and diff analysis.
pub const GRAPH_NODE_SPAN_TYPE: &str = "langgraph_node";

/// Source mapping for a graph node (file/line/function that produced it).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SourceRef {
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub line: Option<u64>,
    #[serde(default)]
    pub function: Option<String>,
}

/// Nested metadata inside a span's attribute bag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpanMetadata {
    #[serde(default)]
    pub source_ref: Option<SourceRef>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Open key-value attribute bag attached to every span. The analysis core
/// only reads the fields named here; anything else rides along in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpanAttributes {
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub node_type: Option<String>,
    /// Graph state observed when the node started.
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub input_state: Option<serde_json::Map<String, serde_json::Value>>,
    /// Graph state recorded when the node finished.
    #[serde(default)]
    #[ts(type = "Record<string, unknown> | null")]
    pub output_state: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub metadata: Option<SpanMetadata>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single execution span as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SpanNode {
    /// Opaque identifier, unique within a trace.
    pub id: String,
    /// Owning span, or None for a root span. A value that does not resolve
    /// to another span in the same collection is treated as a root.
    #[serde(default)]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub span_type: String,
    /// Open status set; "success", "error" and "running" are significant,
    /// everything else is neutral.
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    /// None while the span is still running.
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub attributes: SpanAttributes,
}

impl SpanNode {
    /// Whether this span participates in topology/diff analysis.
    pub fn is_graph_node(&self) -> bool {
        self.span_type == GRAPH_NODE_SPAN_TYPE
    }

    /// Display label: the graph node name when present, the span name otherwise.
    pub fn display_name(&self) -> &str {
        self.attributes
            .node_name
            .as_deref()
            .unwrap_or(&self.name)
    }

    pub fn source_ref(&self) -> Option<&SourceRef> {
        self.attributes
            .metadata
            .as_ref()
            .and_then(|m| m.source_ref.as_ref())
    }
}

/// Backend decision attached to a trace summary (judge outcome).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecisionSummary {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One trace row as returned by the list endpoint and embedded in detail.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TraceSummary {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub has_open_spans: bool,
    #[serde(default)]
    pub user_review_passed: Option<bool>,
    #[serde(default)]
    pub decision: Option<DecisionSummary>,
}

/// One event in the trace timeline.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEvent {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub source: String,
    #[serde(default)]
    pub source_id: Option<String>,
    pub event_type: String,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub payload: serde_json::Value,
}

/// `GET /api/v1/traces/{id}` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TraceDetail {
    pub trace: TraceSummary,
    #[serde(default)]
    pub spans: Vec<SpanNode>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub evaluations: Vec<serde_json::Value>,
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub decision_history: Vec<serde_json::Value>,
    #[serde(default)]
    #[ts(type = "Array<unknown>")]
    pub judge_runs: Vec<serde_json::Value>,
}

/// `GET /api/v1/traces` paginated response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TraceListPage {
    #[serde(default)]
    pub items: Vec<TraceSummary>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    #[ts(type = "number")]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatsTotals {
    #[serde(default)]
    #[ts(type = "number")]
    pub open_traces: u64,
    #[serde(default)]
    #[ts(type = "number")]
    pub success_traces: u64,
    #[serde(default)]
    #[ts(type = "number")]
    pub error_traces: u64,
}

/// `GET /api/v1/traces/stats/overview` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatsOverview {
    #[serde(default)]
    pub window_hours: u32,
    #[serde(default)]
    pub totals: StatsTotals,
    #[serde(default)]
    #[ts(type = "Record<string, number>")]
    pub decisions: std::collections::HashMap<String, u64>,
    #[serde(default)]
    #[ts(type = "Record<string, number>")]
    pub span_types: std::collections::HashMap<String, u64>,
    #[serde(default)]
    pub sampled_at: Option<DateTime<Utc>>,
}

/// `GET /healthz` response.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
}
