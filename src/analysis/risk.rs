//! Risk scoring and dashboard row annotation.
//!
//! A deterministic, additive score over one trace summary row, used purely
//! for sorting and color banding in the dashboard. No backend state depends
//! on it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::api::types::{StatsTotals, TraceSummary};

/// Additive weighted risk score, clamped to [0, 100].
pub fn risk_score(row: &TraceSummary) -> u8 {
    let mut score: i64 = 0;
    if row.status == "error" {
        score += 55;
    }
    if row.has_open_spans {
        score += 20;
    }
    match row.decision.as_ref().and_then(|d| d.action.as_deref()) {
        Some("ESCALATE") => score += 25,
        Some("BLOCK") => score += 35,
        _ => {}
    }
    if row.user_review_passed == Some(false) {
        score += 20;
    }
    // Completion shortfall contributes at 0.2 weight, never negatively.
    let completion = (row.completion_rate * 100.0).round() as i64;
    score += (((100 - completion) as f64) * 0.2).round().max(0.0) as i64;

    score.clamp(0, 100) as u8
}

/// Color band for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Ok,
    Warn,
    High,
}

impl RiskBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 75 {
            RiskBand::High
        } else if score >= 45 {
            RiskBand::Warn
        } else {
            RiskBand::Ok
        }
    }
}

/// Wall-clock duration of a trace in milliseconds, clamped at 0. An open
/// trace (no end time) is measured against `now`.
pub fn trace_duration_ms(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u64 {
    let Some(start) = start else {
        return 0;
    };
    (end.unwrap_or(now) - start).num_milliseconds().max(0) as u64
}

/// A trace summary row augmented with the derived dashboard fields.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct AnnotatedTrace {
    pub trace: TraceSummary,
    pub risk_score: u8,
    pub risk_band: RiskBand,
    #[ts(type = "number")]
    pub duration_ms: u64,
    pub sla_breach: bool,
}

/// Annotate every row: risk score, band, duration, SLA breach against the
/// configured threshold.
pub fn annotate_rows(
    rows: &[TraceSummary],
    sla_threshold_ms: u64,
    now: DateTime<Utc>,
) -> Vec<AnnotatedTrace> {
    rows.iter()
        .map(|row| {
            let score = risk_score(row);
            let duration_ms = trace_duration_ms(row.start_time, row.end_time, now);
            AnnotatedTrace {
                trace: row.clone(),
                risk_score: score,
                risk_band: RiskBand::from_score(score),
                duration_ms,
                sla_breach: duration_ms >= sla_threshold_ms,
            }
        })
        .collect()
}

/// Rows demanding attention: SLA breach, error status, or score ≥ 70.
/// Sorted by score descending (stable, so equal scores keep input order)
/// and capped at `limit`.
pub fn priority_queue(rows: &[AnnotatedTrace], limit: usize) -> Vec<AnnotatedTrace> {
    let mut queue: Vec<AnnotatedTrace> = rows
        .iter()
        .filter(|row| row.sla_breach || row.trace.status == "error" || row.risk_score >= 70)
        .cloned()
        .collect();
    queue.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    queue.truncate(limit);
    queue
}

/// p95 over a set of latencies; 0 for an empty set.
pub fn p95_ms(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let idx = ((sorted.len() as f64 * 0.95).ceil() as usize)
        .saturating_sub(1)
        .min(sorted.len() - 1);
    sorted[idx]
}

/// Share of error traces in the stats window, as a rounded percentage.
pub fn error_rate_percent(totals: &StatsTotals) -> u32 {
    let all = (totals.open_traces + totals.success_traces + totals.error_traces).max(1);
    ((totals.error_traces as f64 / all as f64) * 100.0).round() as u32
}

/// Share of ESCALATE/BLOCK among all decisions, as a rounded percentage.
pub fn escalation_rate_percent(decisions: &std::collections::HashMap<String, u64>) -> u32 {
    let total: u64 = decisions.values().sum();
    let escalated = decisions.get("ESCALATE").copied().unwrap_or(0)
        + decisions.get("BLOCK").copied().unwrap_or(0);
    ((escalated as f64 / total.max(1) as f64) * 100.0).round() as u32
}

/// Compact latency formatting: sub-second in ms, otherwise one decimal second.
pub fn format_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
