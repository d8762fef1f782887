//! Router assembly for the memopad service.
//!
//! Public auth routes are merged with memo routes gated by the bearer-token
//! middleware; the binary in main.rs wires this to a listener.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use memopad_api::auth::{self, AppState};
use memopad_api::memos;
use memopad_api::middleware::require_auth;

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/memos", get(memos::list_memos))
        .route("/memos", post(memos::create_memo))
        .route("/memos/{memo_id}", put(memos::update_memo))
        .route("/memos/{memo_id}", delete(memos::delete_memo))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
