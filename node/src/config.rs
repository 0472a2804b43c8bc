//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::logging::LogFormat;
use crate::NodeError;

/// Configuration for a votechain node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Interface the HTTP API binds to.
    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    /// Port the HTTP API listens on. `0` picks a free port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bound on a single peer chain fetch during consensus, in milliseconds.
    #[serde(default = "default_peer_timeout_ms")]
    pub peer_timeout_ms: u64,

    /// Bound on a single `/mine` proof search, in seconds. Unset means the
    /// search runs until it finds a proof or the node shuts down.
    #[serde(default)]
    pub mine_timeout_secs: Option<u64>,

    /// Peers registered (and granted their token) at start-up.
    #[serde(default)]
    pub bootstrap_peers: Vec<BootstrapPeer>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// A peer known before the node starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapPeer {
    /// URL or bare `host:port`.
    pub address: String,
    #[serde(default)]
    pub government: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_peer_timeout_ms() -> u64 {
    5_000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// `host:port` to bind.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.port)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_millis(self.peer_timeout_ms)
    }

    pub fn mine_timeout(&self) -> Option<Duration> {
        self.mine_timeout_secs.map(Duration::from_secs)
    }

    /// The configured log format. Anything other than "json" is human.
    pub fn log_format(&self) -> LogFormat {
        self.log_format.parse().unwrap_or(LogFormat::Human)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            port: default_port(),
            peer_timeout_ms: default_peer_timeout_ms(),
            mine_timeout_secs: None,
            bootstrap_peers: Vec::new(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
