//! votechain daemon: entry point for running a vote ledger node.

use clap::Parser;
use std::path::PathBuf;
use votechain_node::{init_logging, LogFormat, NodeConfig, VoteNode};

#[derive(Parser)]
#[command(name = "votechain", about = "Vote ledger node")]
struct Cli {
    /// Port to listen on.
    #[arg(short, long, env = "VOTECHAIN_PORT")]
    port: Option<u16>,

    /// Interface to bind.
    #[arg(long, env = "VOTECHAIN_HOST")]
    host: Option<String>,

    /// Per-peer timeout for consensus, in milliseconds.
    #[arg(long, env = "VOTECHAIN_PEER_TIMEOUT_MS")]
    peer_timeout_ms: Option<u64>,

    /// Give up a single `/mine` search after this many seconds.
    #[arg(long, env = "VOTECHAIN_MINE_TIMEOUT_SECS")]
    mine_timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VOTECHAIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VOTECHAIN_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VOTECHAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Subcommand. Defaults to `node run`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Node commands.
    #[command(name = "node")]
    Node {
        #[command(subcommand)]
        action: NodeAction,
    },
}

#[derive(clap::Subcommand)]
enum NodeAction {
    /// Run the node.
    Run,
    /// Print the effective configuration as TOML.
    Config,
}

impl Cli {
    /// Overlay CLI flags on `base`.
    fn merge_into(&self, base: NodeConfig) -> NodeConfig {
        NodeConfig {
            listen_host: self.host.clone().unwrap_or(base.listen_host),
            port: self.port.unwrap_or(base.port),
            peer_timeout_ms: self.peer_timeout_ms.unwrap_or(base.peer_timeout_ms),
            mine_timeout_secs: self.mine_timeout_secs.or(base.mine_timeout_secs),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            log_format: self.log_format.clone().unwrap_or(base.log_format),
            ..base
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => NodeConfig::from_toml_file(path)?,
        None => NodeConfig::default(),
    };
    let config = cli.merge_into(base);

    match cli.command.unwrap_or(Command::Node {
        action: NodeAction::Run,
    }) {
        Command::Node { action } => match action {
            NodeAction::Config => {
                print!("{}", config.to_toml_string());
            }
            NodeAction::Run => {
                init_logging(config.log_format(), &config.log_level);
                if config.log_format.parse::<LogFormat>().is_err() {
                    tracing::warn!(format = %config.log_format, "unknown log format, using human");
                }
                if let Some(path) = &cli.config {
                    tracing::info!("Loaded config from {}", path.display());
                }
                tracing::info!(
                    addr = %config.listen_addr(),
                    peers = config.bootstrap_peers.len(),
                    "starting votechain node"
                );

                let node = VoteNode::new(config)?;
                node.run().await?;

                tracing::info!("votechain daemon exited cleanly");
            }
        },
    }

    Ok(())
}
