//! HTTP liveness prober backed by reqwest.
//!
//! One GET against `{endpoint}/ping` with a bounded timeout. HTTP 200 means
//! up; any other status, connection error, or timeout folds into
//! [`ProbeOutcome::Down`]. The timeout must stay below the sweep interval so
//! a hung agent costs at most one probe's worth of delay.

use std::time::Duration;

use chrono::Utc;
use reqwest::StatusCode;
use station_core::liveness::probe::{AgentProber, ProbeOutcome};

/// reqwest-based implementation of `AgentProber`.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build a prober whose every request is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// `{endpoint}/ping`, tolerating a trailing slash on the base.
    fn ping_url(endpoint: &str) -> String {
        format!("{}/ping", endpoint.trim_end_matches('/'))
    }
}

impl AgentProber for HttpProber {
    async fn probe(&self, endpoint: &str) -> ProbeOutcome {
        let url = Self::ping_url(endpoint);
        match self.client.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => ProbeOutcome::Up(Utc::now()),
            Ok(response) => ProbeOutcome::Down(format!("status {}", response.status())),
            Err(err) if err.is_timeout() => ProbeOutcome::Down("timeout".to_string()),
            Err(err) => ProbeOutcome::Down(err.to_string()),
        }
    }
}
