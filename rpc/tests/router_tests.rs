//! Route-level tests driven through the router with `oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use votechain_consensus::ConsensusResolver;
use votechain_ledger::{Ledger, REJECTION_MESSAGE};
use votechain_nullables::NullChainSource;
use votechain_rpc::{router, AppState};
use votechain_work::{CancelToken, ProofOfWork};

fn state_with(source: NullChainSource) -> AppState<NullChainSource> {
    AppState::new(Ledger::new(), ConsensusResolver::new(source))
}

fn app() -> Router {
    router(state_with(NullChainSource::new()))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
    let request = Request::builder().method(method).uri(uri).body(body).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(&body.to_string())).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn chain_starts_at_genesis() {
    let (status, body) = get(&app(), "/chain").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["length"], 1);
    assert_eq!(body["chain"][0]["index"], 1);
    assert_eq!(body["chain"][0]["proof"], 100);
    assert_eq!(body["chain"][0]["previous_hash"], "1");
}

#[tokio::test]
async fn ballot_vote_mine_tabulate() {
    let app = app();

    let (status, body) = post(&app, "/nodes/register", json!({"address": "http://10.0.0.1:5000", "type": false})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "New node has been added and given 1 token");
    assert_eq!(body["total_nodes"], json!(["c10.0.0.1:5000"]));

    let (status, body) = post(&app, "/nodes/register", json!({"address": "10.0.0.2:5000", "type": "government"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_nodes"], json!(["c10.0.0.1:5000", "g10.0.0.2:5000"]));

    let (status, body) = post(&app, "/add_candidate", json!({"name": "Alice"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Candidate Alice added");

    let vote = json!({"sender": "c10.0.0.1:5000", "recipient": "g10.0.0.2:5000", "amount": 1, "name": "Alice"});
    let (status, body) = post(&app, "/transactions/new", vote.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let message = body.as_str().unwrap();
    let index: u64 = message
        .strip_prefix("Vote will be added to block ")
        .unwrap()
        .parse()
        .unwrap();
    assert!((2..=4).contains(&index));

    let (status, body) = post(&app, "/transactions/new", vote).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, REJECTION_MESSAGE);

    let (status, body) = get(&app, "/mine").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "New Block Forged");
    assert_eq!(body["index"], 2);
    assert_eq!(body["previous_hash"].as_str().unwrap().len(), 64);

    let (_, chain) = get(&app, "/chain").await;
    assert_eq!(chain["length"], 2);
    let committed = chain["chain"][1]["transactions"].as_array().unwrap();
    assert_eq!(committed.len(), 3);
    assert!(!chain.to_string().contains("10.0.0.1"));

    let (status, body) = get(&app, "/tabulate").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alice: 1 vote(s). ");
}

#[tokio::test]
async fn candidate_name_is_kept_verbatim() {
    let app = app();
    post(&app, "/nodes/register", json!({"address": "10.0.0.1:5000", "type": false})).await;
    post(&app, "/nodes/register", json!({"address": "10.0.0.2:5000", "type": true})).await;

    let (status, body) = post(&app, "/add_candidate", json!({"name": " Alice"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Candidate  Alice added");

    let (status, _) = post(&app, "/add_candidate", json!({"name": "   "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let vote = json!({"sender": "c10.0.0.1:5000", "recipient": "g10.0.0.2:5000", "amount": 1, "name": " Alice"});
    let (status, body) = post(&app, "/transactions/new", vote).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body, REJECTION_MESSAGE);

    let (_, body) = get(&app, "/tabulate").await;
    assert_eq!(body["message"], " Alice: 1 vote(s). ");
}

#[tokio::test]
async fn repeat_registration_grants_one_token() {
    let app = app();
    for address in ["10.0.0.1:5000", "http://10.0.0.1:5000/", "10.0.0.1:5000"] {
        let (status, body) = post(&app, "/nodes/register", json!({"address": address, "type": false})).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total_nodes"], json!(["c10.0.0.1:5000"]));
    }

    get(&app, "/mine").await;
    let (_, chain) = get(&app, "/chain").await;
    assert_eq!(chain["chain"][1]["transactions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn fractional_amount_gets_generic_rejection() {
    let app = app();
    let vote = json!({"sender": "ca:1", "recipient": "gb:1", "amount": 0.5, "name": "Alice"});
    let (status, body) = post(&app, "/transactions/new", vote).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, REJECTION_MESSAGE);
}

#[tokio::test]
async fn missing_fields_are_input_errors() {
    let app = app();
    let (status, body) = post(&app, "/transactions/new", json!({"sender": "ca:1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing values");

    let (status, body) = post(&app, "/nodes/register", json!({"address": "a:1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing values");

    let (status, body) = post(&app, "/add_candidate", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Enter a name");

    let (status, _) = call(&app, Method::POST, "/add_candidate", Some("not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_address_is_distinct_failure() {
    let app = app();
    let (status, body) = post(&app, "/nodes/register", json!({"address": "http://", "type": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Error: Please supply a valid node"));
    assert_ne!(error, "Missing values");

    let (_, chain) = get(&app, "/chain").await;
    assert_eq!(chain["chain"][0]["transactions"], json!([]));
}

#[tokio::test]
async fn cancelled_mining_is_unavailable() {
    let state = state_with(NullChainSource::new());
    state.shutdown.cancel();
    let app = router(state);
    let (status, body) = get(&app, "/mine").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("cancelled"));
}

#[tokio::test]
async fn resolve_without_peers_is_authoritative() {
    let (status, body) = get(&app(), "/nodes/resolve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Our chain is authoritative");
    assert_eq!(body["chain"].as_array().unwrap().len(), 1);
    assert!(body.get("new_chain").is_none());
}

#[tokio::test]
async fn resolve_adopts_longer_peer_chain() {
    let mut remote = Ledger::new();
    for _ in 0..2 {
        let proof = ProofOfWork::new()
            .mine(remote.last_block(), &CancelToken::new())
            .unwrap();
        remote.new_block(proof, None);
    }
    let source = NullChainSource::new().with_chain("peer:1", remote.chain().to_vec());
    let app = router(state_with(source));

    post(&app, "/nodes/register", json!({"address": "peer:1", "type": 1})).await;
    let (status, body) = get(&app, "/nodes/resolve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Our chain was replaced");
    assert_eq!(body["new_chain"].as_array().unwrap().len(), 3);
    assert!(body.get("chain").is_none());

    let (_, chain) = get(&app, "/chain").await;
    assert_eq!(chain["length"], 3);
}
