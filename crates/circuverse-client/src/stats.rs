//! Statistics feed
//!
//! Read-only aggregate counts computed by the stats endpoint. The dashboard
//! polls on an interval; a failed poll keeps the previous value on display
//! (or the skeleton state when nothing has loaded yet) and is not retried
//! before the next tick.

use crate::config::ApiConfig;
use circuverse_model::GlobalStats;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default dashboard poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Statistics fetch failure
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Non-success status from the endpoint
    #[error("stats endpoint error ({status}): {message}")]
    Endpoint {
        status: u16,
        message: String,
    },

    /// Network failure
    #[error("stats transport failed: {0}")]
    Transport(String),

    /// Body was not valid stats JSON
    #[error("malformed stats response: {0}")]
    Malformed(String),
}

/// One-shot statistics client
#[derive(Debug, Clone)]
pub struct StatsClient {
    config: ApiConfig,
    client: Client,
}

impl StatsClient {
    /// Create a client for the configured endpoint
    pub fn new(config: ApiConfig) -> Result<Self, StatsError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| StatsError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    /// Fetch the current aggregates
    pub async fn fetch(&self) -> Result<GlobalStats, StatsError> {
        let mut builder = self.client.get(self.config.endpoint("get-stats"));
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| StatsError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StatsError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(StatsError::Endpoint {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| StatsError::Malformed(e.to_string()))
    }
}

/// Background poller publishing stats over a watch channel
///
/// The channel holds `None` until the first successful fetch (skeleton
/// state). The poll task is aborted when the poller is dropped.
#[derive(Debug)]
pub struct StatsPoller {
    rx: watch::Receiver<Option<GlobalStats>>,
    task: JoinHandle<()>,
}

impl StatsPoller {
    /// Spawn a poller fetching every `interval`
    #[must_use]
    pub fn spawn(client: StatsClient, interval: Duration) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match client.fetch().await {
                    Ok(stats) => {
                        tracing::debug!(
                            submissions = stats.total_submissions,
                            "stats refreshed"
                        );
                        tx.send_replace(Some(stats));
                    }
                    // Keep the previous value; the next tick retries.
                    Err(err) => tracing::warn!(error = %err, "stats poll failed"),
                }
                if tx.is_closed() {
                    break;
                }
            }
        });
        Self { rx, task }
    }

    /// Subscribe to published stats
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<GlobalStats>> {
        self.rx.clone()
    }

    /// Latest published stats, if any fetch has succeeded
    #[must_use]
    pub fn latest(&self) -> Option<GlobalStats> {
        self.rx.borrow().clone()
    }
}

impl Drop for StatsPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}
