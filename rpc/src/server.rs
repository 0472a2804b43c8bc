//! Axum router for the node API.

use axum::routing::{get, post};
use axum::Router;
use votechain_consensus::ChainSource;

use crate::handlers;
use crate::state::AppState;

/// Build the router serving every node route over `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
    S: ChainSource + 'static,
{
    Router::new()
        .route("/add_candidate", post(handlers::add_candidate::<S>))
        .route("/mine", get(handlers::mine::<S>))
        .route("/tabulate", get(handlers::tabulate::<S>))
        .route("/transactions/new", post(handlers::new_transaction::<S>))
        .route("/chain", get(handlers::full_chain::<S>))
        .route("/nodes/register", post(handlers::register_node::<S>))
        .route("/nodes/resolve", get(handlers::resolve::<S>))
        .with_state(state)
}
