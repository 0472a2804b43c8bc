//! Route handlers and their request/response bodies.
//!
//! Request bodies are read as raw bytes and parsed as JSON regardless of the
//! `Content-Type` header, so bare `curl -d` calls work.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, Instrument};
use votechain_consensus::{ChainSource, Resolution};
use votechain_ledger::{AdmissionOutcome, RejectReason};
use votechain_types::{Block, BlockHash, ChainSnapshot};

use crate::error::RpcError;
use crate::state::AppState;
use crate::tracing_spans::{mine_span, resolve_span, rpc_span};

const MISSING_VALUES: &str = "Missing values";
const ENTER_A_NAME: &str = "Enter a name";
const INVALID_NODE: &str = "Error: Please supply a valid node // 'address', 'type'";

// ── Responses ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub proof: u64,
    pub previous_hash: BlockHash,
}

#[derive(Debug, Serialize)]
pub struct TabulateResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

/// Exactly one of `new_chain` / `chain` is present.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chain: Option<Vec<Block>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<Block>>,
}

impl From<Resolution> for ResolveResponse {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Replaced { chain, .. } => Self {
                message: "Our chain was replaced",
                new_chain: Some(chain),
                chain: None,
            },
            Resolution::Authoritative { chain } => Self {
                message: "Our chain is authoritative",
                new_chain: None,
                chain: Some(chain),
            },
        }
    }
}

// ── Request parsing ──────────────────────────────────────────────────────

/// Parse `body` as a JSON object holding every key in `required`.
fn require_fields(
    body: &[u8],
    required: &[&str],
    missing: &str,
) -> Result<Map<String, Value>, RpcError> {
    let values = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(values)) => values,
        _ => return Err(RpcError::InvalidRequest(missing.to_string())),
    };
    if required.iter().all(|key| values.contains_key(*key)) {
        Ok(values)
    } else {
        Err(RpcError::InvalidRequest(missing.to_string()))
    }
}

/// A token amount: an integer, or a float with no fractional part.
fn amount_from_json(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

/// The `type` field of a registration: true for a government node.
///
/// Accepts booleans, numbers (non-zero is government) and the role names.
fn node_type_from_json(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "government" | "govt" | "g" => Some(true),
            "civilian" | "c" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Extract vote fields, mapping a wrongly typed field to the rule it breaks.
fn vote_fields(values: &Map<String, Value>) -> Result<(&str, &str, i64, &str), RejectReason> {
    let sender = values["sender"].as_str().ok_or(RejectReason::MalformedAddress)?;
    let recipient = values["recipient"].as_str().ok_or(RejectReason::MalformedAddress)?;
    let amount = amount_from_json(&values["amount"]).ok_or(RejectReason::InvalidAmount)?;
    let name = values["name"].as_str().ok_or(RejectReason::NotOnBallot)?;
    Ok((sender, recipient, amount, name))
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// `POST /add_candidate` `{name}`.
pub async fn add_candidate<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Json<String>, RpcError> {
    let values = require_fields(&body, &["name"], ENTER_A_NAME)?;
    let name = match values["name"].as_str() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => return Err(RpcError::InvalidRequest(ENTER_A_NAME.to_string())),
    };

    state.ledger.lock().await.add_candidate(name.clone());
    Ok(Json(format!("Candidate {name} added")))
}

/// `GET /mine`: find the next proof and forge a block.
///
/// The search runs on the blocking pool against a snapshot of the tip. If
/// the tip moved while searching (another block was forged or the chain
/// was replaced) the search starts over against the new tip.
pub async fn mine<S>(State(state): State<AppState<S>>) -> Result<Json<MineResponse>, RpcError> {
    let tip_index = state.ledger.lock().await.last_block().index;
    async move {
        loop {
            let (last_proof, last_hash) = state.ledger.lock().await.tip();

            let pow = state.pow;
            let token = state.mining_token();
            let search_hash = last_hash.clone();
            let proof = tokio::task::spawn_blocking(move || {
                pow.mine_from(last_proof, &search_hash, &token)
            })
            .await
            .map_err(|e| RpcError::Internal(format!("mining task failed: {e}")))??;

            let mut ledger = state.ledger.lock().await;
            if ledger.tip() != (last_proof, last_hash) {
                debug!("tip moved during proof search; retrying");
                continue;
            }
            let block = ledger.new_block(proof, None);
            return Ok(Json(MineResponse {
                message: "New Block Forged",
                index: block.index,
                proof: block.proof,
                previous_hash: block.previous_hash.clone(),
            }));
        }
    }
    .instrument(mine_span(tip_index))
    .await
}

/// `GET /tabulate`.
pub async fn tabulate<S>(State(state): State<AppState<S>>) -> Json<TabulateResponse> {
    let tally = state.ledger.lock().await.tabulate();
    Json(TabulateResponse {
        message: tally.to_string(),
    })
}

/// `POST /transactions/new` `{sender, recipient, amount, name}`.
///
/// Always `201` once the fields are present; the body says whether the
/// vote was accepted.
pub async fn new_transaction<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<String>), RpcError> {
    let values = require_fields(&body, &["sender", "recipient", "amount", "name"], MISSING_VALUES)?;

    let outcome = async {
        match vote_fields(&values) {
            Ok((sender, recipient, amount, name)) => {
                state.ledger.lock().await.submit_vote(sender, recipient, amount, name)
            }
            Err(reason) => {
                debug!(%reason, "transaction rejected");
                AdmissionOutcome::Rejected(reason)
            }
        }
    }
    .instrument(rpc_span("/transactions/new"))
    .await;

    Ok((StatusCode::CREATED, Json(outcome.message())))
}

/// `GET /chain`.
pub async fn full_chain<S>(State(state): State<AppState<S>>) -> Json<ChainSnapshot> {
    Json(state.ledger.lock().await.snapshot())
}

/// `POST /nodes/register` `{address, type}`: register a node and grant it
/// its voting token.
pub async fn register_node<S>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegisterResponse>), RpcError> {
    let values = require_fields(&body, &["address", "type"], MISSING_VALUES)?;
    let address = values["address"]
        .as_str()
        .ok_or_else(|| RpcError::InvalidAddress("address must be a string".to_string()))?;
    let government = node_type_from_json(&values["type"])
        .ok_or_else(|| RpcError::InvalidRequest(INVALID_NODE.to_string()))?;

    let total_nodes = async {
        let mut ledger = state.ledger.lock().await;
        ledger.enroll_node(address, government)?;
        Ok::<Vec<String>, RpcError>(ledger.nodes().tagged().map(String::from).collect())
    }
    .instrument(rpc_span("/nodes/register"))
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "New node has been added and given 1 token",
            total_nodes,
        }),
    ))
}

/// `GET /nodes/resolve`: adopt the longest valid peer chain, if any.
pub async fn resolve<S: ChainSource>(State(state): State<AppState<S>>) -> Json<ResolveResponse> {
    let peer_count = state.ledger.lock().await.nodes().len();
    let resolution = state
        .resolver
        .resolve(&state.ledger)
        .instrument(resolve_span(peer_count))
        .await;
    Json(resolution.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amounts() {
        assert_eq!(amount_from_json(&json!(1)), Some(1));
        assert_eq!(amount_from_json(&json!(1.0)), Some(1));
        assert_eq!(amount_from_json(&json!(1.5)), None);
        assert_eq!(amount_from_json(&json!("1")), None);
        assert_eq!(amount_from_json(&json!(null)), None);
    }

    #[test]
    fn node_types() {
        assert_eq!(node_type_from_json(&json!(true)), Some(true));
        assert_eq!(node_type_from_json(&json!(0)), Some(false));
        assert_eq!(node_type_from_json(&json!(1)), Some(true));
        assert_eq!(node_type_from_json(&json!("Government")), Some(true));
        assert_eq!(node_type_from_json(&json!("c")), Some(false));
        assert_eq!(node_type_from_json(&json!("mayor")), None);
        assert_eq!(node_type_from_json(&json!([1])), None);
    }

    #[test]
    fn require_fields_checks_keys_and_shape() {
        assert!(require_fields(br#"{"name":"A"}"#, &["name"], "x").is_ok());
        assert!(require_fields(br#"{"other":"A"}"#, &["name"], "x").is_err());
        assert!(require_fields(b"not json", &["name"], "x").is_err());
        assert!(require_fields(b"[1]", &["name"], "x").is_err());
    }

    #[test]
    fn wrongly_typed_vote_fields() {
        let values = json!({"sender": 5, "recipient": "g1", "amount": 1, "name": "A"});
        assert_eq!(
            vote_fields(values.as_object().unwrap()),
            Err(RejectReason::MalformedAddress)
        );
        let values = json!({"sender": "c1", "recipient": "g1", "amount": "one", "name": "A"});
        assert_eq!(
            vote_fields(values.as_object().unwrap()),
            Err(RejectReason::InvalidAmount)
        );
    }
}
