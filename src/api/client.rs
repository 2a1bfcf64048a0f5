//! HTTP client for the Trace Hub backend.
//!
//! Thin typed wrapper over the REST surface. Each call walks the configured
//! candidate base URLs in order and retries the full round a bounded number
//! of times with a fixed backoff. Filtering and pagination are server-side;
//! this client only forwards query parameters and the API key header.

use serde::de::DeserializeOwned;

use crate::api::types::{HealthResponse, StatsOverview, TraceDetail, TraceListPage};
use crate::config::HubConfig;
use crate::error::HubError;

const API_KEY_HEADER: &str = "x-api-key";
const PROJECT_HEADER: &str = "x-project-id";

pub struct HubClient {
    http: reqwest::Client,
    config: HubConfig,
}

impl HubClient {
    /// Create a client from the given config. The underlying `reqwest::Client`
    /// uses the configured transport timeout.
    pub fn new(config: HubConfig) -> Result<Self, HubError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    // --------------------------------------------------------------------
    // Private HTTP helpers
    // --------------------------------------------------------------------

    /// Build an authenticated GET against one candidate base URL.
    fn authed(&self, base: &str, path: &str, project_id: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self
            .http
            .get(format!("{}{}", base, path))
            .header(API_KEY_HEADER, &self.config.api_key);
        if let Some(project) = project_id {
            req = req.header(PROJECT_HEADER, project);
        }
        req
    }

    /// Fetch one candidate: check the status code, deserialize on 2xx,
    /// surface the body text on failure.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        base: &str,
        path: &str,
        project_id: Option<&str>,
    ) -> Result<T, HubError> {
        let response = self.authed(base, path, project_id).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HubError::Backend {
                status: status.as_u16(),
                message: if message.is_empty() {
                    format!("failed {} via {}", path, base)
                } else {
                    message
                },
            });
        }
        Ok(response.json().await?)
    }

    /// Walk the candidate list, retrying the full round up to
    /// `retry.max_attempts` times with a fixed backoff between rounds.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        project_id: Option<&str>,
    ) -> Result<T, HubError> {
        let mut last_error: Option<HubError> = None;

        for attempt in 1..=self.config.retry.max_attempts.max(1) {
            for base in &self.config.base_urls {
                match self.fetch_one(base, path, project_id).await {
                    Ok(value) => return Ok(value),
                    Err(err) => {
                        tracing::debug!(%base, %path, attempt, "backend candidate failed: {}", err);
                        last_error = Some(err);
                    }
                }
            }
            if attempt < self.config.retry.max_attempts {
                tokio::time::sleep(self.config.retry.backoff).await;
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no base URLs configured".into());
        tracing::warn!(%path, "backend fetch exhausted all candidates: {}", detail);
        Err(HubError::Unreachable(format!("{}: {}", path, detail)))
    }

    // --------------------------------------------------------------------
    // Endpoints
    // --------------------------------------------------------------------

    /// `GET /healthz` -- backend liveness.
    pub async fn health(&self) -> Result<HealthResponse, HubError> {
        self.get_json("/healthz", None).await
    }

    /// `GET /api/v1/traces/{id}` -- full trace detail with spans, timeline,
    /// evaluations, decisions, and judge runs.
    pub async fn get_trace(&self, trace_id: &str) -> Result<TraceDetail, HubError> {
        let path = format!("/api/v1/traces/{}", trace_id);
        self.get_json(&path, None).await
    }

    /// `GET /api/v1/traces?page={page}&page_size={page_size}` -- paginated
    /// trace summaries, optionally scoped to a project.
    pub async fn list_traces(
        &self,
        page: u32,
        page_size: u32,
        project_id: Option<&str>,
    ) -> Result<TraceListPage, HubError> {
        let path = format!("/api/v1/traces?page={}&page_size={}", page.max(1), page_size.max(1));
        self.get_json(&path, project_id).await
    }

    /// `GET /api/v1/traces/stats/overview?last_hours={h}` -- windowed counters.
    pub async fn stats_overview(
        &self,
        last_hours: u32,
        project_id: Option<&str>,
    ) -> Result<StatsOverview, HubError> {
        let path = format!("/api/v1/traces/stats/overview?last_hours={}", last_hours);
        self.get_json(&path, project_id).await
    }
}
