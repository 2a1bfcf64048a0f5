pub mod client;
pub mod types;

pub use client::HubClient;
pub use types::{
    DecisionSummary, HealthResponse, SourceRef, SpanAttributes, SpanMetadata, SpanNode,
    StatsOverview, StatsTotals, TimelineEvent, TraceDetail, TraceListPage, TraceSummary,
    GRAPH_NODE_SPAN_TYPE,
};
