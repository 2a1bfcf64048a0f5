//! Trace analysis core for the LLM Trace Hub dashboard.
//!
//! Fetches trace detail, summaries, and stats from the Trace Hub backend and
//! recomputes the derived display structures on every render pass: the
//! layered graph-node topology, the longest-duration execution path, the
//! indented span tree, per-node state diffs, and risk scores for trace rows.
//! All derivations are pure functions of an immutable span snapshot; the
//! only asynchronous pieces are the backend client and the polling refresh
//! driver.

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod live;
pub mod logging;

pub use api::HubClient;
pub use config::{HubConfig, RetryPolicy};
pub use error::HubError;
pub use live::LiveRefresher;
