//! Endpoint configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/functions/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration shared by all HTTP collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the serverless function gateway
    pub base_url: String,
    /// Bearer token, if the gateway requires one
    pub api_key: Option<String>,
    /// Authenticated user id attached to analysis submissions
    pub user_id: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Configuration for a base URL with defaults elsewhere
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            ..Self::default()
        }
    }

    /// Read configuration from `CIRCUVERSE_API_URL` / `CIRCUVERSE_API_KEY`
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("CIRCUVERSE_API_URL") {
            config.base_url = trim_trailing_slash(url);
        }
        config.api_key = std::env::var("CIRCUVERSE_API_KEY").ok();
        config
    }

    /// With bearer token
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// With user id
    #[inline]
    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL for an endpoint path
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request timeout as a [`Duration`]
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            user_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn endpoint_joins_paths() {
        let config = ApiConfig::new("https://api.example.com/v1/");
        assert_eq!(
            config.endpoint("/analyze-waste"),
            "https://api.example.com/v1/analyze-waste"
        );
        assert_eq!(config.endpoint("get-stats"), "https://api.example.com/v1/get-stats");
    }

    #[test]
    fn builder_setters() {
        let config = ApiConfig::default()
            .with_api_key("secret")
            .with_user_id("u-1")
            .with_timeout_secs(5);

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.user_id.as_deref(), Some("u-1"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
