//! Axum HTTP server and routing.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Report every failed request through [`http_errors::send_http_error`]
//!   and render the result ([`reject`]).

pub mod handlers;
pub mod reject;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
