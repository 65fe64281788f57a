//! Analysis endpoint client
//!
//! Thin pass-through to the hosted classification model:
//! `POST {base}/analyze-waste` with `{ wasteInput, userId }`, answered by an
//! analysis payload in the wire format of [`RawAnalysis`]. The client applies
//! the documented defaults so renderers never see partial data.

use crate::config::ApiConfig;
use async_trait::async_trait;
use circuverse_engine::{AnalysisError, WasteAnalyzer};
use circuverse_model::{AnalysisResult, RawAnalysis};
use reqwest::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    waste_input: &'a str,
    user_id: Option<&'a str>,
}

/// HTTP implementation of [`WasteAnalyzer`]
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    config: ApiConfig,
    client: Client,
}

impl AnalysisClient {
    /// Create a client for the configured endpoint
    ///
    /// # Errors
    /// [`AnalysisError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, AnalysisError> {
        Self::new(ApiConfig::from_env())
    }

    /// Endpoint configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn map_transport(&self, err: reqwest::Error) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::Timeout(self.config.timeout_secs)
        } else {
            AnalysisError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl WasteAnalyzer for AnalysisClient {
    async fn analyze(&self, input: &str) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalyzeRequest {
            waste_input: input,
            user_id: self.config.user_id.as_deref(),
        };

        let mut builder = self
            .client
            .post(self.config.endpoint("analyze-waste"))
            .json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(endpoint = "analyze-waste", "submitting waste input");
        let response = builder.send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(AnalysisError::Endpoint {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

        // The endpoint reports model failures inside a 2xx body.
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(AnalysisError::Endpoint {
                status: status.as_u16(),
                message: message.to_string(),
            });
        }

        let raw: RawAnalysis = serde_json::from_value(value)
            .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;
        let result = raw.normalize();
        tracing::info!(waste_type = %result.waste_type, "analysis received");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn analyze_request_wire_format() {
        let request = AnalyzeRequest {
            waste_input: "plastic bottles",
            user_id: Some("u-1"),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["wasteInput"], "plastic bottles");
        assert_eq!(json["userId"], "u-1");
    }

    #[test]
    fn anonymous_request_serializes_null_user() {
        let request = AnalyzeRequest {
            waste_input: "debris",
            user_id: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json["userId"].is_null());
    }

    #[test]
    fn client_builds_from_config() {
        let client = AnalysisClient::new(ApiConfig::new("http://localhost:9999")).unwrap();
        assert_eq!(client.config().base_url, "http://localhost:9999");
    }
}
