//! REST session configuration.

use std::time::Duration;

/// Configuration for a [`RestSession`](crate::session::RestSession).
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the platform API, including any path prefix,
    /// e.g. `https://percept.example.com/api/v1`
    pub base_url: String,
    /// API token sent with every request, if set
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create config from environment variables.
    ///
    /// Reads `PERCEPT_HOST`, `PERCEPT_TOKEN` and `PERCEPT_TIMEOUT` (seconds).
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("PERCEPT_HOST")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string()),
            token: std::env::var("PERCEPT_TOKEN").ok(),
            timeout: Duration::from_secs(
                std::env::var("PERCEPT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }
}
