//! Two nodes on loopback converging on the longer chain.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use votechain_node::{BootstrapPeer, NodeConfig, NodeError, VoteNode};
use votechain_work::{CancelToken, ProofOfWork};

struct Running {
    node: std::sync::Arc<VoteNode>,
    addr: SocketAddr,
    handle: JoinHandle<Result<(), NodeError>>,
}

impl Running {
    async fn start(config: NodeConfig) -> Self {
        let node = std::sync::Arc::new(VoteNode::new(config).unwrap());
        let listener = node.bind().await.unwrap();
        let addr = listener.local_addr().unwrap();
        let serving = std::sync::Arc::clone(&node);
        let handle = tokio::spawn(async move { serving.serve(listener).await });
        Self { node, addr, handle }
    }

    async fn grow_to(&self, length: usize) {
        let mut ledger = self.node.state().ledger.lock().await;
        while ledger.len() < length {
            let proof = ProofOfWork::new()
                .mine(ledger.last_block(), &CancelToken::new())
                .unwrap();
            ledger.new_block(proof, None);
        }
    }

    async fn stop(self) {
        self.node.shutdown.shutdown();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server stops after shutdown")
            .unwrap()
            .unwrap();
    }
}

fn loopback() -> NodeConfig {
    NodeConfig {
        listen_host: "127.0.0.1".into(),
        port: 0,
        peer_timeout_ms: 2_000,
        ..NodeConfig::default()
    }
}

async fn get_json(addr: SocketAddr, path: &str) -> Value {
    reqwest::get(format!("http://{addr}{path}"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shorter_node_adopts_longer_chain() {
    let long = Running::start(loopback()).await;
    long.grow_to(5).await;

    let short = Running::start(NodeConfig {
        bootstrap_peers: vec![BootstrapPeer {
            address: format!("http://{}", long.addr),
            government: true,
        }],
        ..loopback()
    })
    .await;
    short.grow_to(3).await;

    let resolved = get_json(short.addr, "/nodes/resolve").await;
    assert_eq!(resolved["message"], "Our chain was replaced");
    assert_eq!(resolved["new_chain"].as_array().unwrap().len(), 5);

    let long_chain = get_json(long.addr, "/chain").await;
    let short_chain = get_json(short.addr, "/chain").await;
    assert_eq!(short_chain, long_chain);

    let client = reqwest::Client::new();
    let registered = client
        .post(format!("http://{}/nodes/register", long.addr))
        .body(format!(r#"{{"address": "{}", "type": false}}"#, short.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(registered.status(), reqwest::StatusCode::CREATED);
    drop(client);

    let resolved = get_json(long.addr, "/nodes/resolve").await;
    assert_eq!(resolved["message"], "Our chain is authoritative");
    assert_eq!(resolved["chain"].as_array().unwrap().len(), 5);

    short.stop().await;
    long.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_peer_is_skipped() {
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_addr = closed.local_addr().unwrap();
    drop(closed);

    let node = Running::start(NodeConfig {
        bootstrap_peers: vec![BootstrapPeer {
            address: dead_addr.to_string(),
            government: false,
        }],
        ..loopback()
    })
    .await;

    let resolved = get_json(node.addr, "/nodes/resolve").await;
    assert_eq!(resolved["message"], "Our chain is authoritative");
    node.stop().await;
}

#[test]
fn invalid_bootstrap_peer_is_config_error() {
    let result = VoteNode::new(NodeConfig {
        bootstrap_peers: vec![BootstrapPeer {
            address: "http://".into(),
            government: false,
        }],
        ..loopback()
    });
    assert!(matches!(result, Err(NodeError::Config(_))));
}
