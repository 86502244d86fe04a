//! RPS Node
//!
//! HTTP host for the commit-reveal game: exposes game creation, commits,
//! reveals, queries and the audit log over an in-memory ledger.

pub mod config;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use handlers::*;
pub use config::{ConfigError, NodeConfig};
pub use state::NodeState;

/// Build the node's router
pub fn create_router(state: NodeState) -> Router {
    Router::new()
        // Games
        .route("/games", post(create_game).get(list_games))
        .route("/games/:game_id", get(get_game))
        .route("/games/:game_id/commit", post(commit_result))
        .route("/games/:game_id/reveal", post(reveal_result))
        // Ledger
        .route("/log", get(get_log))
        .route("/clock/next", post(set_next_timestamp))
        // Health
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
