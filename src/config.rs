use std::time::Duration;

/// Retry behavior for backend fetches: bounded attempt count with a fixed
/// pause between full rounds over the candidate base URLs.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Explicit configuration for the backend client and dashboard derivations.
///
/// All client and dashboard knobs live here as enumerated fields with
/// defaults; nothing is looked up from ambient process state at call time.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Candidate backend base URLs, tried in order on every request.
    pub base_urls: Vec<String>,
    /// Opaque API key forwarded as the `x-api-key` header.
    pub api_key: String,
    /// Per-request transport timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Latency threshold above which a trace row is flagged as an SLA breach.
    pub sla_threshold_ms: u64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_urls: vec![
                "http://backend:8000".into(),
                "http://localhost:8000".into(),
                "http://127.0.0.1:8000".into(),
            ],
            api_key: "dev-key".into(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            sla_threshold_ms: 30_000,
        }
    }
}

impl HubConfig {
    /// Build a config from the environment, falling back to defaults.
    ///
    /// `BACKEND_URL` is prepended to the candidate list; `API_KEY` replaces
    /// the development key.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("BACKEND_URL") {
            if !url.is_empty() {
                config.base_urls.insert(0, url);
            }
        }
        if let Ok(key) = std::env::var("API_KEY") {
            if !key.is_empty() {
                config.api_key = key;
            }
        }
        config
    }
}
