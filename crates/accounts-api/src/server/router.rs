//! Axum router construction.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use super::{handlers, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
pub fn build(state: AppState, request_timeout: Duration) -> Router {
    with_middleware(routes(), state, request_timeout)
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/me", get(handlers::me))
        .route("/logout", post(handlers::logout))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
}

/// `CatchPanicLayer` sits innermost so a handler panic becomes a 500 that the
/// trace layer still records.
fn with_middleware(routes: Router<AppState>, state: AppState, request_timeout: Duration) -> Router {
    routes
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
