//! Structured logging initialisation for the votechain node.
//!
//! Two output formats are supported:
//! - [`LogFormat::Human`]: coloured, human-readable lines (development).
//! - [`LogFormat::Json`]: newline-delimited JSON (log aggregation).
//!
//! The filter level can be overridden at runtime via the `RUST_LOG`
//! environment variable.  When `RUST_LOG` is not set, the caller-supplied
//! `level` string is used (e.g. `"info"`, `"debug,votechain_ledger=trace"`).

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty-printed, coloured output for local development.
    Human,
    /// Newline-delimited JSON.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}")),
        }
    }
}

/// Initialise the global tracing subscriber.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_logging(format: LogFormat, level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let installed = match format {
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init(),
    };
    installed.is_ok()
}
