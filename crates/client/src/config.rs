use std::time::Duration;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, including the `/api` prefix.
    pub base_url: String,
    /// Fixed timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                     |
    /// |-------------------------------|-----------------------------|
    /// | `ROSTER_API_URL`              | `http://localhost:5000/api` |
    /// | `ROSTER_REQUEST_TIMEOUT_SECS` | `10`                        |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("ROSTER_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let request_timeout = match std::env::var("ROSTER_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    tracing::warn!(value = %raw, "Ignoring invalid ROSTER_REQUEST_TIMEOUT_SECS");
                    defaults.request_timeout
                }
            },
            Err(_) => defaults.request_timeout,
        };

        Self {
            base_url,
            request_timeout,
        }
    }
}
