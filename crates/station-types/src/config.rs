//! Global configuration for the Station hub.
//!
//! `StationConfig` represents the optional `station.toml` file. All fields
//! have sensible defaults; CLI flags and environment variables override the
//! file at startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration for the hub process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// Durable agent registry location.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Append-only chat log location.
    #[serde(default = "default_chat_log_file")]
    pub chat_log_file: PathBuf,

    /// Bind address for the HTTP/WebSocket server.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Delay between liveness sweeps.
    #[serde(default = "default_ping_interval_secs")]
    pub ping_interval_secs: u64,

    /// Per-probe timeout. Must stay below the ping interval so a stuck
    /// agent degrades to inactive instead of stalling the sweep.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/agents.json")
}

fn default_chat_log_file() -> PathBuf {
    PathBuf::from("data/chat.log.jsonl")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_ping_interval_secs() -> u64 {
    3
}

fn default_probe_timeout_secs() -> u64 {
    2
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            chat_log_file: default_chat_log_file(),
            host: default_host(),
            port: default_port(),
            ping_interval_secs: default_ping_interval_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl StationConfig {
    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = StationConfig::default();
        assert_eq!(config.data_file, PathBuf::from("data/agents.json"));
        assert_eq!(config.port, 8000);
        assert_eq!(config.ping_interval_secs, 3);
        assert_eq!(config.probe_timeout_secs, 2);
        assert!(config.probe_timeout() < config.ping_interval());
    }

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let config: StationConfig = toml::from_str("").unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.ping_interval_secs, 3);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_str = r#"
port = 9100
ping_interval_secs = 10
data_file = "/var/lib/station/agents.json"
"#;
        let config: StationConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.ping_interval_secs, 10);
        assert_eq!(config.data_file, PathBuf::from("/var/lib/station/agents.json"));
        // Untouched fields keep their defaults.
        assert_eq!(config.probe_timeout_secs, 2);
    }
}
